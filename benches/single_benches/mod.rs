pub mod bench_msbfs;
pub mod bench_prim;
mod params;
