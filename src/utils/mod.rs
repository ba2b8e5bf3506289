mod argmin;
pub use argmin::argmin;

mod ping_pong;
pub use ping_pong::PingPong;

pub mod matrix_market;
pub mod random;
