pub mod error;
pub mod priority_queue;

pub use error::{QueueError, Result};
pub use priority_queue::{HeapOrder, PriorityQueue, QueueOptions};
