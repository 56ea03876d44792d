/// A length-bounded group of job segments passed to one transfer invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Position of the batch in the run, starting at 1
    pub index: usize,
    /// `url,"destination"` segments in planning order
    pub segments: Vec<String>,
}

impl Batch {
    pub fn new(index: usize, segments: Vec<String>) -> Self {
        Self { index, segments }
    }

    /// The single positional argument handed to the transfer program
    pub fn argument(&self) -> String {
        self.segments.join(" ")
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// A batch whose invocation failed without exhausting the retry budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedBatch {
    pub index: usize,
    pub command: String,
    pub reason: String,
}
