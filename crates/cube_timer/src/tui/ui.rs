//! Stateless UI rendering for the timer.

use super::app::App;
use super::timer::format_elapsed;
use cube_scramble::Face;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::time::Instant;

/// Stickers across the unfolded cube: four faces of three.
pub const NET_WIDTH: usize = 12;
/// Stickers down the unfolded cube: three faces of three.
pub const NET_HEIGHT: usize = 9;

/// Sticker grid of a solved cube unfolded as a cross.
///
/// ```text
///     U
///   L F R B
///     D
/// ```
pub fn solved_net() -> [[Option<Face>; NET_WIDTH]; NET_HEIGHT] {
    let placements = [
        (Face::U, 0, 1),
        (Face::L, 1, 0),
        (Face::F, 1, 1),
        (Face::R, 1, 2),
        (Face::B, 1, 3),
        (Face::D, 2, 1),
    ];

    let mut net = [[None; NET_WIDTH]; NET_HEIGHT];
    for (face, face_row, face_col) in placements {
        for row in 0..3 {
            for col in 0..3 {
                net[face_row * 3 + row][face_col * 3 + col] = Some(face);
            }
        }
    }
    net
}

fn face_color(face: Face) -> Color {
    let (r, g, b) = face.color_rgb();
    Color::Rgb(r, g, b)
}

fn net_lines() -> Vec<Line<'static>> {
    solved_net()
        .iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .iter()
                .enumerate()
                .flat_map(|(col, sticker)| {
                    let gap = if col > 0 && col % 3 == 0 { " " } else { "" };
                    let cell = match sticker {
                        Some(face) => Span::styled("██", Style::default().fg(face_color(*face))),
                        None => Span::raw("  "),
                    };
                    [Span::raw(gap), cell]
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn timer_style(app: &App) -> Style {
    let stopwatch = app.stopwatch();
    let color = if stopwatch.is_held() {
        Color::Yellow
    } else if stopwatch.is_running() {
        Color::Red
    } else {
        Color::Blue
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Draws the main UI.
pub fn draw(f: &mut Frame, app: &App, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(NET_HEIGHT as u16 + 2),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Cube Timer")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let scramble = Paragraph::new(app.scramble_text())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Scramble"));
    f.render_widget(scramble, chunks[1]);

    let time = Paragraph::new(format_elapsed(app.stopwatch().elapsed(now)))
        .style(timer_style(app))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Time"));
    f.render_widget(time, chunks[2]);

    draw_cube(f, chunks[3]);

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, chunks[4]);

    let help = Paragraph::new("Space: Timer | N: New scramble | Q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[5]);
}

fn draw_cube(f: &mut Frame, area: Rect) {
    let cube = Paragraph::new(net_lines())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Cube"));
    f.render_widget(cube, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_has_nine_stickers_per_face() {
        let net = solved_net();
        for face in [Face::U, Face::D, Face::R, Face::L, Face::F, Face::B] {
            let count = net.iter().flatten().filter(|s| **s == Some(face)).count();
            assert_eq!(count, 9, "{} sticker count", face);
        }
        let empty = net.iter().flatten().filter(|s| s.is_none()).count();
        assert_eq!(empty, NET_WIDTH * NET_HEIGHT - 54);
    }

    #[test]
    fn net_places_front_in_the_middle() {
        let net = solved_net();
        assert_eq!(net[4][4], Some(Face::F));
        assert_eq!(net[0][4], Some(Face::U));
        assert_eq!(net[8][4], Some(Face::D));
        assert_eq!(net[4][0], Some(Face::L));
        assert_eq!(net[4][11], Some(Face::B));
        assert_eq!(net[0][0], None);
    }

    #[test]
    fn net_renders_one_line_per_row() {
        assert_eq!(net_lines().len(), NET_HEIGHT);
    }
}
