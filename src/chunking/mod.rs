pub mod chunker;
pub mod prefix;
pub mod writer;
