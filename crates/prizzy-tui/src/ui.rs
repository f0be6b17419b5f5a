use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use prizzy_core::{format_message, Segment, Sender, Tone};
use crate::app::{App, CalcField, View};

const APP_NAME: &str = "PRIZZY";

/// Convert formatted segments into a styled line; text is never reinterpreted
fn segments_to_line(segments: Vec<Segment>) -> Line<'static> {
    let spans: Vec<Span<'static>> = segments
        .into_iter()
        .map(|segment| {
            if segment.bold {
                Span::styled(
                    segment.text,
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(segment.text)
            }
        })
        .collect();

    if spans.is_empty() {
        Line::default()
    } else {
        Line::from(spans)
    }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    if app.show_splash {
        render_splash(frame, area);
        return;
    }

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    match app.view {
        View::Calculators => render_calculators(app, frame, body_area),
        View::Mentor => render_mentor(app, frame, body_area),
    }

    render_footer(app, frame, footer_area);
}

fn render_splash(frame: &mut Frame, area: Rect) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);

    let text = Text::from(vec![
        Line::from(Span::styled(APP_NAME, Style::default().fg(Color::Cyan).bold())),
        Line::default(),
        Line::from(Span::styled("Your AI Forex Mentor", Style::default().fg(Color::DarkGray))),
    ]);
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), middle);
}

fn render_header(app: &mut App, frame: &mut Frame, area: Rect) {
    let title = format!(" {} ", APP_NAME);
    let calculators_label = " Calculators ";
    let mentor_label = " AI Mentor ";

    let tab_style = |active: bool| {
        if active {
            Style::default().bg(Color::Cyan).fg(Color::Black).bold()
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::Gray)
        }
    };

    // Record tab positions for mouse hit-testing
    let title_width = title.chars().count() as u16;
    let calc_width = calculators_label.chars().count() as u16;
    let mentor_width = mentor_label.chars().count() as u16;
    let calc_x = area.x + title_width + 1;
    let mentor_x = calc_x + calc_width + 1;
    app.calculators_tab = Some(Rect::new(calc_x, area.y, calc_width, 1).intersection(area));
    app.mentor_tab = Some(Rect::new(mentor_x, area.y, mentor_width, 1).intersection(area));

    let header = Line::from(vec![
        Span::styled(title, Style::default().fg(Color::Cyan).bold()),
        Span::raw(" "),
        Span::styled(calculators_label, tab_style(app.view == View::Calculators)),
        Span::raw(" "),
        Span::styled(mentor_label, tab_style(app.view == View::Mentor)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(
        Paragraph::new(header).style(Style::default().bg(Color::Black)),
        area,
    );
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = Style::default().bg(Color::Blue).fg(Color::White);

    let mode_text = match app.view {
        View::Calculators => " CALC ",
        View::Mentor => " MENTOR ",
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints = match app.view {
        View::Calculators => {
            let mut hints = vec![
                Span::styled(" Tab/↓ ", key_style),
                Span::styled(" next ", label_style),
                Span::styled(" S-Tab/↑ ", key_style),
                Span::styled(" prev ", label_style),
            ];
            if app.calc_focus.is_pair() {
                hints.extend(vec![
                    Span::styled(" ←/→ ", key_style),
                    Span::styled(" pair ", label_style),
                ]);
            } else {
                hints.extend(vec![
                    Span::styled(" 0-9 . - ", key_style),
                    Span::styled(" edit ", label_style),
                ]);
            }
            hints.extend(vec![
                Span::styled(" m ", key_style),
                Span::styled(" AI mentor ", label_style),
                Span::styled(" q ", key_style),
                Span::styled(" quit ", label_style),
            ]);
            hints
        }
        View::Mentor => {
            let mut hints = if app.chat.is_awaiting() {
                vec![Span::styled(" waiting for reply ", label_style)]
            } else {
                vec![
                    Span::styled(" Enter ", key_style),
                    Span::styled(" send ", label_style),
                ]
            };
            hints.extend(vec![
                Span::styled(" PgUp/PgDn ", key_style),
                Span::styled(" scroll ", label_style),
                Span::styled(" Esc ", key_style),
                Span::styled(" calculators ", label_style),
                Span::styled(" C-c ", key_style),
                Span::styled(" quit ", label_style),
            ]);
            hints
        }
    };

    let footer_content = Line::from(
        vec![
            Span::styled(mode_text, mode_style),
            Span::styled(" ", label_style),
        ]
        .into_iter()
        .chain(hints)
        .collect::<Vec<_>>(),
    );

    let footer = Paragraph::new(footer_content).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}

// ============================================================================
// Calculators
// ============================================================================

fn render_calculators(app: &App, frame: &mut Frame, area: Rect) {
    let [top, bottom] = Layout::vertical([
        Constraint::Percentage(50),
        Constraint::Percentage(50),
    ])
    .areas(area);
    let [top_left, top_right] = Layout::horizontal([
        Constraint::Percentage(50),
        Constraint::Percentage(50),
    ])
    .areas(top);
    let [bottom_left, bottom_right] = Layout::horizontal([
        Constraint::Percentage(50),
        Constraint::Percentage(50),
    ])
    .areas(bottom);

    let calc = &app.calculators;
    let focus = app.calc_focus;

    let position = calc.position_size.compute();
    render_card(
        frame,
        top_left,
        "Position Size Calculator",
        focus,
        vec![
            field_line("Account Balance ($)", &calc.position_size.account_balance, CalcField::AccountBalance, focus),
            field_line("Risk per Trade (%)", &calc.position_size.risk_percentage, CalcField::RiskPercentage, focus),
            field_line("Stop Loss (pips)", &calc.position_size.stop_loss_pips, CalcField::PositionStopLoss, focus),
            pair_line(calc.position_size.pair.label(), CalcField::PositionPair, focus),
            Line::default(),
            result_line("Recommended Lot Size", position.lot_size, Color::Cyan),
            result_line("Amount at Risk", position.risk_amount, Color::Yellow),
            result_line("Position Size", position.position_size, Color::Gray),
        ],
        &[
            CalcField::AccountBalance,
            CalcField::RiskPercentage,
            CalcField::PositionStopLoss,
            CalcField::PositionPair,
        ],
    );

    let profit_loss = calc.profit_loss.compute();
    let pl_color = match profit_loss.tone {
        Tone::Gain => Color::Green,
        Tone::Loss => Color::Red,
        Tone::Neutral => Color::Gray,
    };
    render_card(
        frame,
        top_right,
        "Profit / Loss Calculator",
        focus,
        vec![
            field_line("Pips Gained / Lost", &calc.profit_loss.pips, CalcField::ProfitLossPips, focus),
            field_line("Lot Size", &calc.profit_loss.lot_size, CalcField::ProfitLossLotSize, focus),
            Line::default(),
            result_line("Profit / Loss", profit_loss.value, pl_color),
        ],
        &[CalcField::ProfitLossPips, CalcField::ProfitLossLotSize],
    );

    render_card(
        frame,
        bottom_left,
        "Risk/Reward Ratio",
        focus,
        vec![
            field_line("Stop Loss (pips)", &calc.risk_reward.stop_loss_pips, CalcField::RiskRewardStopLoss, focus),
            field_line("Take Profit (pips)", &calc.risk_reward.take_profit_pips, CalcField::RiskRewardTakeProfit, focus),
            Line::default(),
            result_line("Risk to Reward Ratio", calc.risk_reward.compute(), Color::Cyan),
        ],
        &[CalcField::RiskRewardStopLoss, CalcField::RiskRewardTakeProfit],
    );

    render_card(
        frame,
        bottom_right,
        "Pip Value Calculator",
        focus,
        vec![
            pair_line(calc.pip_value.pair.label(), CalcField::PipValuePair, focus),
            field_line("Lot Size", &calc.pip_value.lot_size, CalcField::PipValueLotSize, focus),
            Line::default(),
            result_line("Value per Pip", calc.pip_value.compute(), Color::Cyan),
        ],
        &[CalcField::PipValuePair, CalcField::PipValueLotSize],
    );
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    focus: CalcField,
    lines: Vec<Line<'static>>,
    fields: &[CalcField],
) {
    let border_color = if fields.contains(&focus) { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", title));

    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn field_line(label: &str, value: &str, field: CalcField, focus: CalcField) -> Line<'static> {
    let focused = field == focus;
    let value_style = if focused {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if focused { "▏" } else { " " };

    Line::from(vec![
        Span::styled(format!(" {:<22}", label), Style::default().fg(Color::Gray)),
        Span::styled(format!(" {}{} ", value, cursor), value_style),
    ])
}

fn pair_line(pair: &str, field: CalcField, focus: CalcField) -> Line<'static> {
    let focused = field == focus;
    let value_style = if focused {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled(format!(" {:<22}", "Currency Pair"), Style::default().fg(Color::Gray)),
        Span::styled(format!(" ◀ {} ▶ ", pair), value_style),
    ])
}

fn result_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<22}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(format!(" {}", value), Style::default().fg(color).bold()),
    ])
}

// ============================================================================
// Mentor
// ============================================================================

fn render_mentor(app: &mut App, frame: &mut Frame, area: Rect) {
    let [chat_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(area);

    // Store chat area dimensions for scroll calculations (inner size minus borders)
    app.chat_height = chat_area.height.saturating_sub(2);
    app.chat_width = chat_area.width.saturating_sub(2);

    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" AI Mentor · {} ", app.mentor.model()));

    let mut lines: Vec<Line> = Vec::new();

    for msg in app.chat.messages() {
        match msg.sender {
            Sender::User => {
                lines.push(Line::from(Span::styled(
                    "You:",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )));
                for line in msg.text.split('\n') {
                    lines.push(Line::from(line.to_string()));
                }
            }
            Sender::Ai => {
                lines.push(Line::from(Span::styled(
                    "Prizzy:",
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                )));
                for segments in format_message(&msg.text) {
                    lines.push(segments_to_line(segments));
                }
            }
        }
        lines.push(Line::default());
    }

    if app.chat.is_awaiting() {
        lines.push(Line::from(Span::styled(
            "Prizzy:",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Thinking{}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let chat = Paragraph::new(Text::from(lines))
        .block(chat_block)
        .wrap(Wrap { trim: false })
        .scroll((app.chat_scroll, 0));

    frame.render_widget(chat, chat_area);

    render_chat_input(app, frame, input_area);
}

fn render_chat_input(app: &App, frame: &mut Frame, area: Rect) {
    let awaiting = app.chat.is_awaiting();
    let border_color = if awaiting { Color::DarkGray } else { Color::Yellow };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Ask (Enter to send) ");

    // Horizontal scrolling keeps the cursor inside the box (minus borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.chat_cursor;

    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let input = if app.chat_input.is_empty() {
        let placeholder = if awaiting {
            "Waiting for Prizzy..."
        } else {
            "Ask about a trading concept..."
        };
        Paragraph::new(Span::styled(placeholder, Style::default().fg(Color::DarkGray)))
    } else {
        let visible_text: String = app
            .chat_input
            .chars()
            .skip(scroll_offset)
            .take(inner_width)
            .collect();
        Paragraph::new(visible_text).style(Style::default().fg(Color::Cyan))
    };

    frame.render_widget(input.block(input_block), area);

    if !awaiting {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}
