use super::{Element, Matrix, Result, Vector};

/// Number of threads used by a [`Context`] to run single engine operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Threads {
    /// Let rayon decide (usually one thread per core).
    #[default]
    Default,
    /// A fixed number of threads.
    NumThreads(usize),
}

impl Threads {
    fn build(self) -> Result<rayon::ThreadPool> {
        let builder = match self {
            Self::Default => rayon::ThreadPoolBuilder::new(),
            Self::NumThreads(num_threads) => {
                rayon::ThreadPoolBuilder::new().num_threads(num_threads)
            }
        };
        Ok(builder.build()?)
    }
}

/// The backend of the masked operation engine.
///
/// A context is built once by the caller and passed by reference to the
/// algorithms; it owns the thread pool on which single operations may run
/// in parallel, and provides factory methods creating containers whose fill
/// value is the [sentinel](Element::SENTINEL) of their element type.
///
/// The engine operations themselves are methods of this type (see the
/// `exec` module). Algorithms issue them one at a time and never observe
/// their internal parallelism.
#[derive(Debug)]
pub struct Context {
    pool: rayon::ThreadPool,
}

impl Context {
    /// Creates a new context.
    pub fn new(threads: Threads) -> Result<Self> {
        Ok(Self {
            pool: threads.build()?,
        })
    }

    /// Creates a new context running every operation on a single thread.
    pub fn sequential() -> Result<Self> {
        Self::new(Threads::NumThreads(1))
    }

    /// Returns the number of threads of the backend pool.
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Returns a human-readable description of the backend.
    pub fn info(&self) -> String {
        format!("cpu ({} threads)", self.num_threads())
    }

    /// Creates an empty vector filled with the sentinel of `T`.
    pub fn make_vector<T: Element>(&self, len: usize) -> Result<Vector<T>> {
        Vector::new(len, T::SENTINEL)
    }

    /// Creates an empty matrix filled with the sentinel of `T`.
    pub fn make_matrix<T: Element>(&self, nrows: usize, ncols: usize) -> Result<Matrix<T>> {
        Matrix::new(nrows, ncols, T::SENTINEL)
    }

    #[inline(always)]
    pub(crate) fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        self.pool.install(op)
    }
}
