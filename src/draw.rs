use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::{match_table, stats};
use crate::state::app_state::{FIRST_MATCHWEEK, LAST_MATCHWEEK};
use crate::state::network::LoadingState;
use crate::ui::layout::LayoutAreas;
use epl_predictor_api::{ExplanationSection, WorkflowSection};

static TABS: &[&str; 2] = &["Matches", "Model"];

const STATS_HEIGHT: u16 = 8;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
            }

            match app.state.active_tab {
                MenuItem::Matches => draw_matches(f, layout.main, app),
                MenuItem::Model => draw_model(f, layout.main, app),
                MenuItem::Help => draw_placeholder(
                    f,
                    layout.main,
                    "Help: q=quit  1=Matches  2=Model  ←/→=matchweek  j/k=scroll  \"=logs  f=fullscreen",
                ),
            }

            if let Some(logs) = layout.logs {
                draw_logs(f, logs);
            }

            draw_loading_spinner(f, f.area(), loading);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Matches => 0,
        MenuItem::Model => 1,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_matches(f: &mut Frame, area: Rect, app: &App) {
    let board = &app.state.board;
    let title = format!(" ⚽ Matchweek {} Results ", board.selected_matchweek);
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Pending season load degrades to "no data yet", never an error banner.
    if board.predictions.is_empty() {
        f.render_widget(
            Paragraph::new("No prediction data yet...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let [header, stats_area, table_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(STATS_HEIGHT),
        Constraint::Fill(1),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new(navigation_legend(board.selected_matchweek))
            .style(Style::default().fg(Color::DarkGray)),
        header,
    );

    let [week_area, season_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(stats_area);
    f.render_widget(stats::week_panel(board), week_area);
    f.render_widget(stats::season_panel(board), season_area);

    let subset = board.filtered_predictions(board.selected_matchweek);
    f.render_widget(match_table::match_table(&subset), table_area);
}

fn navigation_legend(selected: u32) -> String {
    let mut legend = String::from("Keys:");
    if selected > FIRST_MATCHWEEK {
        legend.push_str("  ←=last week");
    }
    if selected < LAST_MATCHWEEK {
        legend.push_str("  →=next week");
    }
    legend.push_str("  ?=help  q=quit");
    legend
}

fn draw_model(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Model ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(explanation) = app.state.model.explanation.as_ref() else {
        f.render_widget(
            Paragraph::new("Loading model explanation...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    if let Some(section) = explanation.content.model_explanation.as_ref() {
        push_explanation_section(&mut lines, section);
    }
    if let Some(workflow) = explanation.content.model_workflow.as_ref() {
        push_workflow_section(&mut lines, workflow);
    }

    if !app.state.model.baseline.is_empty() {
        lines.push(Line::default());
        lines.push(heading_line("Validation performance"));
        for (name, value) in app.state.model.baseline.iter() {
            lines.push(Line::from(format!("  {name}: {value:.2}%")));
        }
    }

    if lines.is_empty() {
        lines.push(Line::from("No model explanation content available."));
    }

    f.render_widget(
        Paragraph::new(lines)
            .scroll((app.state.model.scroll_offset, 0))
            .wrap(tui::widgets::Wrap { trim: false }),
        inner,
    );
}

fn push_explanation_section(lines: &mut Vec<Line<'static>>, section: &ExplanationSection) {
    lines.push(heading_line(section.title.clone()));
    lines.push(Line::from(section.description.clone()));
    for (i, point) in section.points.iter().enumerate() {
        lines.push(Line::from(format!("{}. {}", i + 1, point.title)));
        for subpoint in &point.subpoints {
            lines.push(Line::from(format!("   • {subpoint}")));
        }
    }
    lines.push(Line::default());
}

fn push_workflow_section(lines: &mut Vec<Line<'static>>, workflow: &WorkflowSection) {
    lines.push(heading_line(workflow.title.clone()));
    lines.push(Line::from(workflow.description.clone()));
    for (i, step) in workflow.steps.iter().enumerate() {
        lines.push(Line::from(format!("{}. {}", i + 1, step.title)));
        for substep in &step.substeps {
            lines.push(Line::from(format!("   • {substep}")));
        }
    }
    lines.push(Line::default());
}

fn heading_line(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))
}

fn draw_placeholder(f: &mut Frame, area: Rect, text: &str) {
    let block = default_border(Color::White).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(text.to_owned()).wrap(tui::widgets::Wrap { trim: true }),
        inner,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(widget, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, loading: LoadingState) {
    if loading.spinner_char == ' ' {
        return;
    }
    let spinner_area = Rect {
        x: area.right().saturating_sub(3),
        y: area.y,
        width: 1,
        height: 1,
    };
    f.render_widget(
        Paragraph::new(loading.spinner_char.to_string())
            .style(Style::default().fg(Color::Yellow)),
        spinner_area,
    );
}
