mod algorithm;
mod buffer;
mod status;
mod step;

pub use algorithm::Algorithm;
pub use buffer::ValueBuffer;
pub use status::SortStatus;
pub use step::StepEvent;
