pub mod admin;
pub mod health;
pub mod images;
pub mod leaderboard;
pub mod pages;
pub mod users;

pub use admin::{clear_database, clear_images, clear_users, database_stats, reset_database};
pub use health::{health_check, root};
pub use images::{
    get_image, list_images, save_frontend_image, upload_image, upload_rich_content_image,
};
pub use leaderboard::{clear_leaderboard, list_leaderboard, submit_leaderboard};
pub use pages::{cocteles_ranking_page, photos_page, ranking_page};
pub use users::{create_user, get_user, list_users};
