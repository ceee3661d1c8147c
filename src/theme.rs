use ratatui::style::{Color, Modifier, Style};

/// Complete theme configuration for ratatui
#[derive(Clone)]
pub struct ThemeConfig {
    pub list_normal: Style,
    pub list_selected: Style,
    pub border: Style,
    pub border_selected: Style,
    pub title: Style,
    pub text: Style,
    /// Dimmed secondary text on cards (specialty line, clinic address).
    pub muted: Style,
    /// Fee amounts and active radio/checkbox marks.
    pub accent: Style,
}

/// Resolves a theme by name; unknown names fall back to dracula.
pub fn by_name(name: &str) -> ThemeConfig {
    match name {
        "solarized" => solarized_dark(),
        _ => dracula(),
    }
}

/// Returns a ThemeConfig based on the Dracula color palette.
pub fn dracula() -> ThemeConfig {
    let bg = Color::Rgb(40, 42, 54);
    let selection = Color::Rgb(68, 71, 90);
    let fg = Color::Rgb(248, 248, 242);
    let comment = Color::Rgb(98, 114, 164);
    let purple = Color::Rgb(189, 147, 249);
    let green = Color::Rgb(80, 250, 123);

    ThemeConfig {
        list_normal: Style::default().fg(fg).bg(bg),
        list_selected: Style::default()
            .fg(fg)
            .bg(selection)
            .add_modifier(Modifier::BOLD),
        border: Style::default().fg(comment),
        border_selected: Style::default().fg(purple),
        title: Style::default().fg(purple).add_modifier(Modifier::BOLD),
        text: Style::default().fg(fg).bg(bg),
        muted: Style::default().fg(comment),
        accent: Style::default().fg(green),
    }
}

/// Returns a ThemeConfig based on the Solarized Dark color palette.
pub fn solarized_dark() -> ThemeConfig {
    let base02 = Color::Rgb(7, 54, 66);
    let base01 = Color::Rgb(88, 110, 117);
    let base0 = Color::Rgb(131, 148, 150);
    let base3 = Color::Rgb(253, 246, 227);
    let blue = Color::Rgb(38, 139, 210);
    let green = Color::Rgb(133, 153, 0);

    ThemeConfig {
        list_normal: Style::default().fg(base0).bg(base02),
        list_selected: Style::default()
            .fg(base3)
            .bg(blue)
            .add_modifier(Modifier::BOLD),
        border: Style::default().fg(base01),
        border_selected: Style::default().fg(blue),
        title: Style::default().fg(blue).add_modifier(Modifier::BOLD),
        text: Style::default().fg(base0).bg(base02),
        muted: Style::default().fg(base01),
        accent: Style::default().fg(green),
    }
}
