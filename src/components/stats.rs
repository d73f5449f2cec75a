use crate::state::app_state::PredictionBoard;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::Paragraph;

/// Week-scope performance panel: the selected matchweek's percentages and
/// Superbru points. Pending or failed aggregates show as zeros.
pub fn week_panel(board: &PredictionBoard) -> Paragraph<'static> {
    let lines = vec![
        heading("This Week's Performance"),
        metric_line("Correct scores", board.week_evaluation.correct_scores()),
        metric_line("Correct results (W/D/L)", board.week_evaluation.correct_results()),
        heading("SuperBru This Week"),
        value_line("Points from predictions", board.week_points.to_string()),
    ];
    Paragraph::new(lines)
}

/// Season-scope panel: whole-season percentages, points, and the global
/// leaderboard reference totals.
pub fn season_panel(board: &PredictionBoard) -> Paragraph<'static> {
    let mut lines = vec![
        heading("This Season's Performance"),
        metric_line("Correct scores", board.season_evaluation.correct_scores()),
        metric_line("Correct results (W/D/L)", board.season_evaluation.correct_results()),
        heading("SuperBru This Season"),
        value_line("Points from predictions", board.season_points.to_string()),
    ];
    if let Some(leaderboard) = board.leaderboard {
        lines.push(value_line("Global Top points", leaderboard.global_top.to_string()));
        lines.push(value_line("Global Top 250 points", leaderboard.global_top_250.to_string()));
    }
    Paragraph::new(lines)
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)))
}

fn metric_line(label: &'static str, value: Option<f64>) -> Line<'static> {
    value_line(label, format!("{:.2}%", value.unwrap_or(0.0)))
}

fn value_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{label}: ")),
        Span::styled(value, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    ])
}
