use chrono::NaiveDate;
use epl_predictor_api::Prediction;
use tui::layout::Constraint;
use tui::style::{Color, Modifier, Style};
use tui::widgets::{Block, BorderType, Borders, Row, Table};

/// Column order matches the original dashboard table.
const COLUMNS: [&str; 10] = [
    "Day", "Date", "Time", "HomeTeam", "Score", "Result", "PredScore", "PredResult", "AwayTeam",
    "Venue",
];

/// Build the matchweek results table for one week's prediction subset.
/// Rows are highlighted green for exact-score hits and yellow for rows where
/// only the W/D/L outcome was right.
pub fn match_table(predictions: &[Prediction]) -> Table<'static> {
    let header = Row::new(COLUMNS.to_vec())
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = predictions
        .iter()
        .map(|p| {
            let style = if p.exact_score() {
                Style::default().fg(Color::Green)
            } else if p.correct_result() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Row::new(vec![
                p.day.clone(),
                format_date(&p.date),
                p.time.clone(),
                p.home_team.clone(),
                p.score.clone(),
                p.result.clone(),
                p.pred_score.clone(),
                p.pred_result.clone(),
                p.away_team.clone(),
                p.venue.clone(),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(11),
        Constraint::Length(6),
        Constraint::Min(14),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Min(14),
        Constraint::Min(16),
    ];

    Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
}

/// Fixture dates arrive as ISO strings; show them the short way, fall back to
/// the raw value for anything unparseable.
fn format_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|_| raw.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_dates_render_short_form() {
        assert_eq!(format_date("2024-09-21"), "21 Sep 2024");
    }

    #[test]
    fn unparseable_dates_pass_through() {
        assert_eq!(format_date("TBC"), "TBC");
        assert_eq!(format_date(""), "");
    }
}
