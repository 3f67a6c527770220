// Tuning and size constants for the game. Kept in one place so the engine, the overlay
// renderer and the browser adapter agree on them.
pub const GAME_NAME: &str = "Scratch & Win";
pub const SELECTIONS_ALLOWED: usize = 3;
pub const STORAGE_KEY: &str = "scratchGameState";

pub const REVEAL_THRESHOLD: f64 = 0.5;
pub const SCRATCH_RADIUS: f64 = 20.0;
pub const OVERLAY_COLOR: &str = "#000000";
pub const OVERLAY_GLYPH: &str = "\u{1F381}";
pub const GLYPH_WIDTH_DIVISOR: f64 = 9.0;

pub const END_GAME_DELAY_MS: u32 = 5_000;

pub const CERTIFICATE_FILENAME: &str = "my-winnings.png";
pub const SHARE_TITLE: &str = "My Winnings!";
pub const SHARE_TEXT: &str = "Check out the awesome gifts I won!";

pub const TITLE_ENDED: &str = "Here are your gifts!";
pub const TITLE_RESTORED: &str = "Welcome Back!";
