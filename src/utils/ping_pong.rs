/// A pair of owned buffers used alternately as the current state and as the
/// destination of the next state.
///
/// [`split`](PingPong::split) borrows the current buffer immutably and the
/// other one mutably, so an operation computing the next state can never
/// read what it writes; [`flip`](PingPong::flip) then makes the freshly
/// written buffer current.
///
/// # Examples
///
/// ```
/// # use spmat_algo::utils::PingPong;
/// let mut counter = PingPong::new(0, 0);
/// for _ in 0..3 {
///     let (current, next) = counter.split();
///     *next = *current + 1;
///     counter.flip();
/// }
/// assert_eq!(*counter.current(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct PingPong<T> {
    slots: [T; 2],
    current: usize,
}

impl<T> PingPong<T> {
    /// Creates a new pair of buffers; `first` is current.
    pub fn new(first: T, second: T) -> Self {
        Self {
            slots: [first, second],
            current: 0,
        }
    }

    /// Creates a new pair of buffers by calling a fallible constructor
    /// twice.
    pub fn try_new_with<E>(mut make: impl FnMut() -> Result<T, E>) -> Result<Self, E> {
        let first = make()?;
        let second = make()?;
        Ok(Self::new(first, second))
    }

    /// Returns the current buffer.
    #[inline(always)]
    pub fn current(&self) -> &T {
        &self.slots[self.current]
    }

    /// Returns the current buffer mutably, for initialization.
    #[inline(always)]
    pub fn current_mut(&mut self) -> &mut T {
        &mut self.slots[self.current]
    }

    /// Returns the current buffer and, mutably, the other one.
    #[inline(always)]
    pub fn split(&mut self) -> (&T, &mut T) {
        let [first, second] = &mut self.slots;
        if self.current == 0 {
            (first, second)
        } else {
            (second, first)
        }
    }

    /// Makes the other buffer current.
    #[inline(always)]
    pub fn flip(&mut self) {
        self.current ^= 1;
    }

    /// Consumes the pair, returning the current buffer.
    pub fn into_current(self) -> T {
        let [first, second] = self.slots;
        if self.current == 0 {
            first
        } else {
            second
        }
    }
}
