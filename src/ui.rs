use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Screen};
use crate::models::Mode;

pub fn render(app: &App, f: &mut Frame) {
    match app.screen {
        Screen::Dashboard => draw_dashboard(app, f),
        Screen::Study => draw_study(app, f),
    }
}

fn draw_dashboard(app: &App, f: &mut Frame) {
    let size = f.area();
    let block = Block::default()
        .title(" Ivrit Tutor ")
        .borders(Borders::ALL);

    let order_label = if app.shuffled { "随机 Shuffled" } else { "顺序 Sequential" };

    let text = vec![
        Line::from(Span::styled(
            format!("欢迎回来！今天有 {} 个单词需要复习。", app.due_today),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("词库共 {} 个单词", app.catalog.len())),
        Line::from(""),
        Line::from(format!(
            "章节 Chapters: 第 {} 章 - 第 {} 章  (↑/↓ 起始, ←/→ 结束)",
            app.chapter_start, app.chapter_end
        )),
        Line::from(format!("模式 Mode: {}  (Tab 切换)", app.mode.label())),
        Line::from(format!("顺序 Order: {}  (s 切换)", order_label)),
        Line::from(""),
        Line::from("按 Enter 开始 (Press Enter to start)"),
        Line::from("按 q 退出 (Press q to quit)"),
    ];

    let p = Paragraph::new(text).block(block).alignment(Alignment::Center);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ]
            .as_ref(),
        )
        .split(size);

    f.render_widget(p, chunks[1]);
}

fn draw_study(app: &App, f: &mut Frame) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(7),    // card
                Constraint::Length(3), // feedback
                Constraint::Length(2), // footer
            ]
            .as_ref(),
        )
        .split(size);

    draw_card(app, f, chunks[0]);
    draw_feedback(app, f, chunks[1]);
    draw_footer(app, f, chunks[2]);
}

fn draw_card(app: &App, f: &mut Frame, area: Rect) {
    let title = format!(" {} ", app.mode.label());
    let block = Block::default().title(title).borders(Borders::ALL);

    let Some(item) = app.current_item() else {
        let message = if app.mode == Mode::Review {
            "今日无复习内容 (Nothing due today)"
        } else {
            "请选择章节 (No words in this range)"
        };
        let p = Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(p, area);
        return;
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            item.front.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let show_back = match app.mode {
        Mode::Flashcard => app.flipped,
        Mode::Quiz | Mode::Review => app.revealed,
    };

    if show_back {
        lines.push(Line::from(Span::styled(
            item.transliteration.clone(),
            Style::default().fg(Color::Cyan),
        )));
        lines.push(Line::from(format!(
            "{} / {}",
            item.meaning_primary, item.meaning_secondary
        )));
    } else {
        let hint = match app.mode {
            Mode::Flashcard => "按空格翻面 (Space to flip)",
            Mode::Quiz | Mode::Review => "按空格显示答案 (Space to show answer)",
        };
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::Gray),
        )));
    }

    if show_back && app.mode != Mode::Flashcard {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "评分 Rate: 0-2 忘记 / 3-5 记得",
            Style::default().fg(Color::Magenta),
        )));
    }

    let p = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

fn draw_feedback(app: &App, f: &mut Frame, area: Rect) {
    let text = if let Some(outcome) = &app.last_outcome {
        format!(
            "已评分 {} 分，下次复习: {} 天后",
            outcome.quality, outcome.interval_days
        )
    } else {
        String::new()
    };

    let p = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" 反馈 "))
        .alignment(Alignment::Center);
    f.render_widget(p, area);
}

fn draw_footer(app: &App, f: &mut Frame, area: Rect) {
    let progress = match app.deck.position() {
        Some((current, total)) => format!("{} / {}", current, total),
        None => "0 / 0".to_string(),
    };

    let autoplay = if app.autoplay.is_active() {
        format!("  自动播放中 {}ms (a 停止, v 变速)", app.autoplay.speed_ms)
    } else if app.mode == Mode::Flashcard {
        "  a 自动播放".to_string()
    } else {
        String::new()
    };

    let line = Line::from(vec![
        Span::styled(progress, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(autoplay, Style::default().fg(Color::Gray)),
        Span::styled("  Esc 返回 / q 退出", Style::default().fg(Color::Gray)),
    ]);

    let p = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(p, area);
}
