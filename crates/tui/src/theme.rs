use ratatui::style::Color;

pub struct Theme {
    pub border_focus: Color,
    pub border_inactive: Color,
    pub output_border: Color,
    pub command_fg: Color,
    pub reply_fg: Color,
    pub info_fg: Color,
    pub error_fg: Color,
    pub hint_fg: Color,
}

pub const THEME: Theme = Theme {
    border_focus: Color::Cyan,
    border_inactive: Color::DarkGray,
    output_border: Color::DarkGray,
    command_fg: Color::Blue,
    reply_fg: Color::Reset,
    info_fg: Color::Green,
    error_fg: Color::Red,
    hint_fg: Color::DarkGray,
};
