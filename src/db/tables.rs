/// The three record kinds and the table holding each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Images,
    Users,
    Leaderboard,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [RecordKind::Images, RecordKind::Users, RecordKind::Leaderboard];

    pub fn table(self) -> &'static str {
        match self {
            RecordKind::Images => "images",
            RecordKind::Users => "users",
            RecordKind::Leaderboard => "leaderboard",
        }
    }

    pub fn create_sql(self) -> &'static str {
        match self {
            RecordKind::Images => CREATE_IMAGES,
            RecordKind::Users => CREATE_USERS,
            RecordKind::Leaderboard => CREATE_LEADERBOARD,
        }
    }
}

/// Images table: base64 payload stored verbatim
const CREATE_IMAGES: &str = r#"
CREATE TABLE IF NOT EXISTS images (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    image_data TEXT NOT NULL,
    created_at TEXT NOT NULL
)
"#;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    email TEXT NOT NULL,
    time TEXT NOT NULL,
    created_at TEXT NOT NULL
)
"#;

/// Leaderboard table: one row per submitted entry, read back by score
const CREATE_LEADERBOARD: &str = r#"
CREATE TABLE IF NOT EXISTS leaderboard (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    game TEXT NOT NULL,
    position INTEGER NOT NULL,
    name TEXT NOT NULL,
    score INTEGER NOT NULL,
    date TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    created_at TEXT NOT NULL
)
"#;
