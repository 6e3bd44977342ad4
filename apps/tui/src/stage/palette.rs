use crate::domain::Fuel;
use ratatui::style::Color;

pub const BACKGROUND: (u8, u8, u8) = (18, 18, 28);
pub const ANNOTATION: (u8, u8, u8) = (0x5f, 0x5f, 0xa7);

pub const fn fuel_rgb(fuel: Fuel) -> (u8, u8, u8) {
    match fuel {
        Fuel::Gasoline => (0x30, 0x5c, 0xde),
        Fuel::Electric => (0x45, 0xa0, 0x49),
        Fuel::Diesel => (0xc9, 0x1b, 0x00),
    }
}

pub const fn fuel_color(fuel: Fuel) -> Color {
    let (r, g, b) = fuel_rgb(fuel);
    Color::Rgb(r, g, b)
}

/// Terminals have no alpha channel, so opacity is drawn by mixing the
/// color toward the chart background.
pub fn with_opacity(rgb: (u8, u8, u8), opacity: f64) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    Color::Rgb(
        mix_channel(rgb.0, BACKGROUND.0, opacity),
        mix_channel(rgb.1, BACKGROUND.1, opacity),
        mix_channel(rgb.2, BACKGROUND.2, opacity),
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn mix_channel(fg: u8, bg: u8, opacity: f64) -> u8 {
    let value = (f64::from(fg) - f64::from(bg)).mul_add(opacity, f64::from(bg));
    value.round().clamp(0.0, 255.0) as u8
}

pub const fn background() -> Color {
    Color::Rgb(BACKGROUND.0, BACKGROUND.1, BACKGROUND.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_blends_toward_background() {
        assert_eq!(with_opacity((200, 100, 50), 1.0), Color::Rgb(200, 100, 50));
        assert_eq!(with_opacity((200, 100, 50), 0.0), background());
    }
}
