//! Screen rendering.
//!
//! Pure presentation: everything here reads the [`App`] state and produces
//! ratatui widgets. Link highlighting in the viewer comes from
//! `link_segments`, which decides which substring is a link and which link
//! is the current one; this module only picks the colors.

use crate::app::{App, Screen};
use notegraph_core::{link_segments, Segment};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

fn title_style() -> Style {
    Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
}

fn item_style() -> Style {
    Style::default()
}

fn selected_item_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

fn link_style() -> Style {
    Style::default().fg(Color::Cyan)
}

fn selected_link_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn info_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

fn error_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

pub fn draw(f: &mut Frame, app: &App) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    f.render_widget(
        Paragraph::new(Line::styled("Notegraph", title_style()))
            .block(Block::default().borders(Borders::BOTTOM)),
        header,
    );

    // A captured store error replaces the body until the next input.
    if let Some(error) = &app.error {
        f.render_widget(
            Paragraph::new(Line::styled(
                format!("Error: {}", error.user_message()),
                error_style(),
            ))
            .wrap(Wrap { trim: false }),
            body,
        );
        f.render_widget(
            Paragraph::new(Line::styled("press any key to continue", info_style())),
            footer,
        );
        return;
    }

    match app.screen {
        Screen::Projects => draw_projects(f, app, body, footer),
        Screen::ProjectTitle => draw_text_input(
            f,
            app,
            body,
            footer,
            "New Project",
            "enter: save  esc: cancel",
        ),
        Screen::Nodes => draw_nodes(f, app, body, footer),
        Screen::NodeTitle => {
            let heading = if app.title_input.is_empty() {
                "New Node Title"
            } else {
                "Node Title"
            };
            draw_text_input(f, app, body, footer, heading, "enter: continue  esc: cancel")
        }
        Screen::NodeContent => draw_content_editor(f, app, body, footer),
        Screen::NodeViewer => draw_viewer(f, app, body, footer),
    }
}

fn draw_list(
    f: &mut Frame,
    body: Rect,
    heading: String,
    items: Vec<String>,
    selected: usize,
    empty_hint: &str,
) {
    let mut lines = vec![Line::styled(heading, title_style()), Line::raw("")];
    if items.is_empty() {
        lines.push(Line::styled(empty_hint.to_string(), info_style()));
    } else {
        for (i, item) in items.into_iter().enumerate() {
            let style = if i == selected {
                selected_item_style()
            } else {
                item_style()
            };
            lines.push(Line::styled(format!("  {item}  "), style));
        }
    }
    f.render_widget(Paragraph::new(lines), body);
}

fn draw_projects(f: &mut Frame, app: &App, body: Rect, footer: Rect) {
    draw_list(
        f,
        body,
        "Projects".to_string(),
        app.projects.iter().map(|p| p.name.clone()).collect(),
        app.project_index,
        "No projects yet. Press 'n' to create one.",
    );
    f.render_widget(
        Paragraph::new(Line::styled(
            "j/k: navigate  n: new project  enter: open  d: delete  q: quit",
            info_style(),
        )),
        footer,
    );
}

fn draw_nodes(f: &mut Frame, app: &App, body: Rect, footer: Rect) {
    let name = app
        .current_project()
        .map(|p| p.name.as_str())
        .unwrap_or("?");
    draw_list(
        f,
        body,
        format!("Project: {name}"),
        app.nodes.iter().map(|n| n.title.clone()).collect(),
        app.node_index,
        "No nodes yet. Press 'n' to create one.",
    );
    f.render_widget(
        Paragraph::new(Line::styled(
            "j/k: navigate  n: new node  enter: view  d: delete  esc: back",
            info_style(),
        )),
        footer,
    );
}

fn draw_text_input(
    f: &mut Frame,
    app: &App,
    body: Rect,
    footer: Rect,
    heading: &str,
    help: &str,
) {
    let lines = vec![
        Line::styled(heading.to_string(), title_style()),
        Line::raw(""),
        Line::raw(format!("> {}_", app.title_input)),
    ];
    f.render_widget(Paragraph::new(lines), body);
    f.render_widget(Paragraph::new(Line::styled(help, info_style())), footer);
}

fn draw_content_editor(f: &mut Frame, app: &App, body: Rect, footer: Rect) {
    let mut lines = vec![
        Line::styled(format!("Node: {}", app.title_input), title_style()),
        Line::raw(""),
    ];
    for text_line in app.content_input.split('\n') {
        lines.push(Line::raw(text_line.to_string()));
    }
    // Crude cursor on the last line.
    if let Some(last) = lines.last_mut() {
        last.spans.push(Span::raw("_"));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body);
    f.render_widget(
        Paragraph::new(Line::styled(
            "ctrl+s: save  enter: newline  esc: back to title",
            info_style(),
        )),
        footer,
    );
}

fn draw_viewer(f: &mut Frame, app: &App, body: Rect, footer: Rect) {
    let Some(node) = app.nav.current() else {
        return;
    };
    let mut lines = vec![Line::styled(node.title.clone(), title_style()), Line::raw("")];
    lines.extend(content_lines(
        &node.content,
        app.nav.links(),
        app.nav.current_link(),
    ));
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body);
    f.render_widget(
        Paragraph::new(Line::styled(
            "tab: next link  enter: follow  b: back  e: edit  esc: node list",
            info_style(),
        )),
        footer,
    );
}

/// Node content as styled lines: plain text raw, link titles colored, the
/// selected link inverted. Text segments may span multiple lines; link
/// titles are assumed not to (a newline inside `[[...]]` is legal but rare,
/// and renders flattened onto one line).
fn content_lines(
    content: &str,
    links: &[notegraph_core::Link],
    selected: Option<usize>,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    for segment in link_segments(content, links, selected) {
        match segment {
            Segment::Text(text) => {
                let mut parts = text.split('\n');
                if let Some(first) = parts.next() {
                    if !first.is_empty() {
                        spans.push(Span::raw(first.to_string()));
                    }
                }
                for part in parts {
                    lines.push(Line::from(std::mem::take(&mut spans)));
                    if !part.is_empty() {
                        spans.push(Span::raw(part.to_string()));
                    }
                }
            }
            Segment::Link { title, selected } => {
                let style = if selected {
                    selected_link_style()
                } else {
                    link_style()
                };
                spans.push(Span::styled(title.replace('\n', " "), style));
            }
        }
    }
    lines.push(Line::from(spans));
    lines
}
