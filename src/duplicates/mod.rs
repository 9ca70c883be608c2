pub mod combined;
pub mod fingerprint;
pub mod finder;
pub mod grouper;
pub mod model;
pub mod resolver;

pub use finder::{find_duplicates, DetectOptions};
pub use model::{DetectionMethod, Dimensions, DuplicateCluster, FileDescriptor, GroupKey};
pub use resolver::{resolve, DeleteStrategy, Resolution};
