// Logical canvas (pixels)
pub const SCREEN_WIDTH: i32 = 640;
pub const SCREEN_HEIGHT: i32 = 630;

// Bird
pub const BIRD_SIZE: i32 = 40;
pub const BIRD_DRAW_X: i32 = 50;
pub const GRAVITY: f64 = 0.1; // px/frame²
pub const JUMP_IMPULSE: f64 = -2.0; // px/frame, replaces velocity

// Pillars
pub const PILLAR_WIDTH: i32 = 200;
pub const PILLAR_GAP: i32 = 200;
pub const PILLAR_SPEED: i32 = 3; // px/frame

// Host loop
pub const DEFAULT_FPS: u32 = 60;

// Static file server
pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_PUBLIC_DIR: &str = "public";

// Sprites
pub const DEFAULT_ASSET_DIR: &str = "flappybird";
pub const BIRD_SPRITE_FILE: &str = "bird.txt";
pub const PILLAR_SPRITE_FILE: &str = "pillar.txt";

// Logging
pub const DEFAULT_LOG_FILE: &str = "flappy.log";
