#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

pub const BACKGROUND_COLOR: Color = Color::rgb(0, 0, 0);
pub const BORDER_COLOR: Color = Color::rgb(93, 216, 228);
pub const APPLE_COLOR: Color = Color::rgb(255, 0, 0);
pub const SNAKE_COLOR: Color = Color::rgb(0, 255, 0);
