// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Layout, title, footer, help, and style helpers used by TUI rendering.
fn stack_panes_vertically(area: Rect) -> bool {
    area.width < 100
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Documents,
    Search,
    Results,
    Page,
}

impl Focus {
    fn cycle(self) -> Self {
        match self {
            Self::Documents => Self::Search,
            Self::Search => Self::Results,
            Self::Results => Self::Page,
            Self::Page => Self::Documents,
        }
    }

    fn cycle_back(self) -> Self {
        match self {
            Self::Documents => Self::Page,
            Self::Search => Self::Documents,
            Self::Results => Self::Search,
            Self::Page => Self::Results,
        }
    }
}

fn panel_border_style(active: Focus, panel: Focus) -> Style {
    if active != panel {
        return Style::default();
    }
    Style::default().fg(FOCUS_COLOR)
}

fn view_title(label: &str, key: char, tail: Option<&str>) -> String {
    let mut title = format!("─[{key}]─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push(' ');
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

/// `[■■■□□□]`-style bar for the staged cutoff.
fn cutoff_bar(staged: usize, total: usize, width: usize) -> String {
    if total == 0 || width == 0 {
        return format!("[{}]", "□".repeat(width));
    }
    let filled = (staged * width).div_ceil(total).min(width);
    format!("[{}{}]", "■".repeat(filled), "□".repeat(width - filled))
}

fn overlay_style(flags: OverlayFlags) -> Style {
    if flags.editing {
        Style::default().fg(Color::Black).bg(EDIT_COLOR)
    } else if flags.focused {
        Style::default().fg(Color::Black).bg(FOCUS_COLOR)
    } else {
        match flags.kind {
            HighlightKind::Text => Style::default().fg(Color::Black).bg(HIGHLIGHT_COLOR),
            HighlightKind::Area => Style::default().fg(Color::White).bg(Color::DarkGray),
        }
    }
}

fn page_row_line(
    row: PageRow<'_>,
    flags: &[OverlayFlags],
    edit: Option<&ViewportRect>,
) -> Line<'static> {
    let (page, y, cells) = match row {
        PageRow::Header(page) => {
            return Line::from(Span::styled(
                format!("── Page {page} ──"),
                Style::default().fg(PAGE_HEADER_COLOR),
            ));
        }
        PageRow::Blank => return Line::from(""),
        PageRow::Cells { page, y, cells } => (page, y, cells),
    };

    let mut spans = Vec::<Span<'static>>::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    for (x, cell) in cells.iter().enumerate() {
        let in_edit = edit.is_some_and(|rect| {
            rect.page_number == page
                && (x as f64) >= rect.left.floor()
                && (x as f64) < rect.right().ceil()
                && (y as f64) >= rect.top.floor()
                && (y as f64) < rect.bottom().ceil()
        });
        let style = if in_edit {
            Style::default().fg(Color::Black).bg(EDIT_COLOR)
        } else {
            cell.overlay
                .and_then(|rank| flags.get(rank))
                .map(|flags| overlay_style(*flags))
                .unwrap_or_default()
        };
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(cell.ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    Line::from(spans)
}

fn footer_help_line(app: &App, toast_suffix: &str) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();

    match app.mode {
        InputMode::AreaEdit => {
            push_footer_entry(&mut spans, "MOVE", "hjkl");
            push_footer_entry(&mut spans, "RESIZE", "HJKL");
            push_footer_entry(&mut spans, "DONE", "⏎");
            push_footer_entry(&mut spans, "CANCEL", "Esc");
        }
        InputMode::Menu => {
            push_footer_entry(&mut spans, "CHOOSE", "j/k");
            push_footer_entry(&mut spans, "RUN", "⏎");
            push_footer_entry(&mut spans, "CLOSE", "Esc");
        }
        _ => {
            match app.focus {
                Focus::Documents => {
                    push_footer_entry(&mut spans, "OPEN", "⏎");
                    push_footer_entry(&mut spans, "FILTER", "/");
                }
                Focus::Search => {
                    push_footer_entry(&mut spans, "QUERY", "i");
                }
                Focus::Results => {
                    push_footer_entry(&mut spans, "SHOW", "⏎");
                    push_footer_entry(&mut spans, "EDIT", "e");
                    push_footer_entry(&mut spans, "MENU", "m");
                }
                Focus::Page => {
                    push_footer_entry(&mut spans, "SCROLL", "j/k");
                    push_footer_entry(&mut spans, "NEXT", "n/N");
                    push_footer_entry(&mut spans, "PICK", "⏎");
                    push_footer_entry(&mut spans, "MENU", "m");
                }
            }
            let apply = if app.viewer.filter().apply_available() { "f◼" } else { "f◻" };
            push_footer_entry(&mut spans, "SHOWN", "+/-");
            push_footer_entry(&mut spans, "APPLY", apply);
            push_footer_entry(&mut spans, "LINK", "g/y");
            push_footer_entry(&mut spans, "HELP", "?");
            push_footer_entry(&mut spans, "QUIT", "q");
        }
    }

    let fragment = app.viewer.nav().fragment();
    if !fragment.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::styled(format!("#{fragment}"), Style::default().fg(FOCUS_COLOR)));
    }

    let toast_message = toast_suffix.strip_prefix(" | ").unwrap_or(toast_suffix).trim();
    if !toast_message.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::raw(toast_message.to_owned()));
    }

    Line::from(spans)
}

fn prompt_footer_line(prefix: &str, input: &str, toast_suffix: &str) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            prefix.to_owned(),
            Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD),
        ),
        Span::raw(input.to_owned()),
    ];
    if !toast_suffix.is_empty() {
        spans.push(Span::styled(toast_suffix.to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    Line::from(spans)
}

fn footer_brand_line() -> Line<'static> {
    Line::from(vec![Span::styled(FOOTER_BRAND.to_owned(), Style::default().fg(FOOTER_BRAND_COLOR))])
}

fn help_key_style() -> Style {
    Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("?", "Help (toggle)"),
            ("q", "Quit"),
            ("1/2/3/4", "Focus Documents/Search/Results/Page"),
            ("Tab/Shift-Tab", "Focus next/previous panel"),
            ("+/-", "Show more/fewer results (staged)"),
            ("f", "Apply the staged result count"),
            ("g", "Go to a deep link (#highlight-<id>)"),
            ("y", "Yank deep link of the focused result"),
        ],
    ),
    (
        "Documents",
        &[
            ("j/k, ↑/↓", "Move cursor"),
            ("Enter", "Open document (clears results)"),
            ("/", "Filter documents"),
        ],
    ),
    ("Search", &[("i, Enter", "Edit query; Enter submits, Esc leaves")]),
    (
        "Results",
        &[
            ("j/k, ↑/↓", "Move cursor"),
            ("Enter", "Scroll page view to the result"),
            ("e", "Resize an area result"),
            ("m", "Context menu (copy link/text)"),
        ],
    ),
    (
        "Page",
        &[
            ("j/k, ↑/↓", "Scroll by one row"),
            ("PgUp/PgDn", "Scroll by one screen"),
            ("Home/End", "First/last page"),
            ("n/N", "Next/previous result on the pages"),
            ("Enter", "Pick the first result in view"),
            ("e", "Resize the picked area result"),
            ("m", "Context menu of the picked result"),
        ],
    ),
    (
        "Area edit",
        &[
            ("h/j/k/l", "Move the region"),
            ("H/J/K/L", "Shrink/grow the region"),
            ("Enter", "Apply the new region"),
            ("Esc", "Cancel"),
        ],
    ),
];

fn render_help(frame: &mut Frame<'_>, app: &mut App, main_area: Rect) {
    let area = centered_rect(70, 80, main_area);
    frame.render_widget(Clear, area);

    let key_style = help_key_style();
    let header_style = help_header_style();
    let key_col_width = HELP_SECTIONS
        .iter()
        .flat_map(|(_, entries)| entries.iter().map(|(key, _)| key.chars().count()))
        .max()
        .unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();
    for (idx, (section, entries)) in HELP_SECTIONS.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(format!("--- {section} ---"), header_style)));
        for (key, desc) in entries.iter() {
            lines.push(help_kv(key, desc, key_col_width, key_style));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title("─ Help ─")
        .border_style(Style::default().fg(FOCUS_COLOR))
        .title_style(Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    app.help_viewport_height = inner.height;
    let max_scroll =
        lines.len().saturating_sub(inner.height.max(1) as usize).min(u16::MAX as usize) as u16;
    app.help_scroll = app.help_scroll.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_menu(frame: &mut Frame<'_>, menu: &MenuPopup, main_area: Rect) {
    let height = menu.actions.len() as u16 + 2;
    let width = 32.min(main_area.width);
    let area = Rect {
        x: main_area.x + main_area.width.saturating_sub(width) / 2,
        y: main_area.y + main_area.height.saturating_sub(height) / 2,
        width,
        height: height.min(main_area.height),
    };
    frame.render_widget(Clear, area);

    let items = menu
        .actions
        .iter()
        .enumerate()
        .map(|(idx, action)| {
            let style = if idx == menu.cursor {
                Style::default().fg(Color::Black).bg(FOCUS_COLOR)
            } else {
                Style::default()
            };
            ListItem::new(action.label()).style(style)
        })
        .collect::<Vec<_>>();
    let title = format!("─ {} ", menu.highlight_id);
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(FOCUS_COLOR)),
    );
    frame.render_widget(list, area);
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(
        value.to_owned(),
        Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD),
    ));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}
