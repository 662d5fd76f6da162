pub mod envelope;
pub mod image;
pub mod leaderboard;
pub mod pagination;
pub mod stats;
pub mod user;

pub use envelope::{ImageEnvelope, ImageFormat};
pub use image::Image;
pub use leaderboard::{LeaderboardEntry, LeaderboardSubmission, NewLeaderboardEntry, SubmittedEntry};
pub use pagination::{Page, PageParams, PageRequest, Pagination};
pub use stats::{format_bytes, DatabaseStats};
pub use user::{NewUser, User};
