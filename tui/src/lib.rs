//! TUI rendering and input handling for Valentine.
//!
//! The terminal is treated as a grid of 8x16 virtual pixels per cell, so the
//! engine's pixel arithmetic (evasion padding, confetti origins) maps directly
//! onto cells.

mod copy;
mod effects;
mod input;
mod layout;
mod theme;

pub use effects::{ConfettiField, scaled_size};
pub use input::{InputPump, apply_event, handle_events};
pub use theme::{Glyphs, Palette, glyphs, spinner_frame, styles};

use std::time::Duration;

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use valentine_engine::{App, HitRegion, HitRegions, ScreenState, Viewport};

use self::effects::render_ambiance;
use self::layout::{centered_at, clamp_into, fit_label, text_width, wrap_words};

/// Virtual pixels per terminal column.
pub const CELL_WIDTH_PX: f64 = 8.0;
/// Virtual pixels per terminal row.
pub const CELL_HEIGHT_PX: f64 = 16.0;

const QUESTION_CARD_MAX_WIDTH: u16 = 60;
const CELEBRATION_CARD_MAX_WIDTH: u16 = 64;
const CARD_PADDING_X: u16 = 2;
const BUTTON_GAP: u16 = 4;
const BUTTON_HEIGHT: u16 = 3;
const AFFIRMATIVE_PADDING_X: u16 = 4;
const NEGATIVE_PADDING_X: u16 = 3;
/// Frames per spinner step at the 8 ms frame cadence.
const SPINNER_DIVISOR: usize = 12;
/// Frames per pulse half-period.
const PULSE_DIVISOR: usize = 60;

#[must_use]
pub fn viewport_for_size(width: u16, height: u16) -> Viewport {
    Viewport::new(
        f64::from(width) * CELL_WIDTH_PX,
        f64::from(height) * CELL_HEIGHT_PX,
    )
}

#[must_use]
pub fn viewport_for(area: Rect) -> Viewport {
    viewport_for_size(area.width, area.height)
}

/// Hand newly fired bursts to the particle field and advance it.
pub fn update_effects(app: &mut App, confetti: &mut ConfettiField, delta: Duration) {
    let viewport = app.viewport();
    for burst in app.take_confetti() {
        confetti.fire(&burst, viewport);
    }
    confetti.step(delta);
}

/// Render one frame and record where the interactive controls landed.
pub fn draw(frame: &mut Frame, app: &mut App, confetti: &ConfettiField) {
    let area = frame.area();
    app.set_viewport(viewport_for(area));

    let options = app.ui_options();
    let palette = Palette::standard();
    let glyphs = glyphs(options);

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg)),
        area,
    );
    if !options.reduced_motion {
        render_ambiance(app.ambiance(), area, frame.buffer_mut(), &palette, &glyphs);
    }

    let regions = match app.screen() {
        ScreenState::Question => draw_question(frame, app, &palette, &glyphs),
        ScreenState::Loading => {
            draw_loading(frame, app, &palette, &glyphs);
            HitRegions::default()
        }
        ScreenState::Celebration => {
            draw_celebration(frame, app, &palette, &glyphs);
            HitRegions::default()
        }
    };
    app.set_hit_regions(regions);

    confetti.render(area, frame.buffer_mut(), &palette, &glyphs);
}

fn pulse_on(tick: usize, reduced_motion: bool) -> bool {
    reduced_motion || (tick / PULSE_DIVISOR) % 2 == 0
}

fn card_block(palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::card_border(palette))
        .style(Style::default().bg(palette.bg_card))
}

fn in_buffer(buf: &Buffer, x: u16, y: u16) -> bool {
    buf.area.contains(Position::new(x, y))
}

/// `Buffer::set_line` that silently skips rows outside the buffer.
fn put_line(buf: &mut Buffer, x: u16, y: u16, line: &Line<'_>, width: u16) {
    if in_buffer(buf, x, y) {
        let width = width.min(buf.area.right() - x);
        buf.set_line(x, y, line, width);
    }
}

fn put_str(buf: &mut Buffer, x: u16, y: u16, text: &str, style: Style) {
    if in_buffer(buf, x, y) {
        let width = usize::from(buf.area.right() - x);
        buf.set_stringn(x, y, text, width, style);
    }
}

fn centered_lines(buf: &mut Buffer, area: Rect, y: u16, lines: &[String], style: Style) -> u16 {
    for (offset, line) in lines.iter().enumerate() {
        let row = y.saturating_add(offset as u16);
        if row >= area.bottom() {
            break;
        }
        let rect = centered_at(area, row, text_width(line), 1);
        put_str(buf, rect.x, row, &fit_label(line, rect.width), style);
    }
    lines.len() as u16
}

// ============================================================================
// Question screen
// ============================================================================

fn draw_question(frame: &mut Frame, app: &App, palette: &Palette, glyphs: &Glyphs) -> HitRegions {
    let area = frame.area();
    let evasion = app.session().evasion();

    let card_width = area
        .width
        .saturating_sub(4)
        .clamp(1, QUESTION_CARD_MAX_WIDTH);
    let inner_width = card_width.saturating_sub(2 + 2 * CARD_PADDING_X).max(1);

    // Affirmative control, growing with every attempt on the negative one.
    let yes_label = format!("{} {}", copy::AFFIRMATIVE_LABEL, glyphs.heart);
    let (yes_width, yes_height) = scaled_size(
        text_width(&yes_label) + 2 * AFFIRMATIVE_PADDING_X,
        BUTTON_HEIGHT,
        evasion.affirmative_scale(),
    );
    let yes_width = yes_width.min(inner_width);

    // Negative control, shrinking.
    let no_label = if app.ui_options().ascii_only {
        evasion.ascii_phrase()
    } else {
        evasion.phrase()
    };
    let (no_width, no_height) = scaled_size(
        text_width(no_label) + 2 * NEGATIVE_PADDING_X,
        BUTTON_HEIGHT,
        evasion.scale(),
    );

    let title = format!(
        "{}{}{}",
        copy::QUESTION_PREFIX,
        copy::QUESTION_HIGHLIGHT,
        copy::QUESTION_SUFFIX
    );
    let title_lines = wrap_words(&title, inner_width);
    let note_lines = wrap_words(copy::NOTE, inner_width);
    let button_row_height = yes_height.max(BUTTON_HEIGHT);

    // icons, blank, title, blank, buttons, blank, note
    let content_height = 1
        + 1
        + title_lines.len() as u16
        + 1
        + button_row_height
        + 1
        + note_lines.len() as u16;
    let card_height = content_height + 2;
    let total_height = card_height + 2;
    let top = area.y + area.height.saturating_sub(total_height) / 2;

    let card = centered_at(area, top, card_width, card_height.min(area.height));
    let card = clamp_into(card, area);
    frame.render_widget(Clear, card);
    frame.render_widget(card_block(palette), card);
    let inner = Rect::new(
        card.x + 1 + CARD_PADDING_X,
        card.y + 1,
        inner_width,
        card.height.saturating_sub(2),
    )
    .intersection(area);

    let buf = frame.buffer_mut();
    let mut y = inner.y;

    let icons = Line::from(vec![
        Span::styled(glyphs.sparkles, Style::default().fg(palette.yellow)),
        Span::raw("  "),
        Span::styled(
            glyphs.heart,
            Style::default()
                .fg(palette.red)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(glyphs.smile, Style::default().fg(palette.pink_faint)),
    ]);
    let icons_rect = centered_at(inner, y, icons.width() as u16, 1);
    put_line(buf, icons_rect.x, y, &icons, icons_rect.width);
    y += 2;

    for line in &title_lines {
        if y >= inner.bottom() {
            break;
        }
        let rect = centered_at(inner, y, text_width(line), 1);
        put_line(buf, rect.x, y, &title_line(line, palette), rect.width);
        y += 1;
    }
    y += 1;

    // Natural slot: the two controls side by side.
    let row_y = y;
    let pair_width = yes_width + BUTTON_GAP + no_width;
    let pair_left = inner.x + inner.width.saturating_sub(pair_width) / 2;
    let yes_rect = clamp_into(
        Rect::new(
            pair_left,
            row_y + (button_row_height - yes_height) / 2,
            yes_width,
            yes_height,
        ),
        area,
    );
    y += button_row_height + 1;

    centered_lines(buf, inner, y, &note_lines, styles::note(palette));

    let footer_y = card.bottom() + 1;
    if footer_y < area.bottom() {
        let footer = fit_label(copy::QUESTION_FOOTER, area.width);
        let rect = centered_at(area, footer_y, text_width(&footer), 1);
        put_str(
            buf,
            rect.x,
            footer_y,
            &footer,
            Style::default()
                .fg(palette.pink_faint)
                .add_modifier(Modifier::ITALIC),
        );
    }
    if area.height > total_height + 1 {
        let hint = fit_label(copy::KEY_HINT, area.width);
        let rect = centered_at(area, area.bottom() - 1, text_width(&hint), 1);
        put_str(buf, rect.x, rect.y, &hint, styles::key_hint(palette));
    }

    draw_button(
        buf,
        yes_rect,
        &yes_label,
        styles::affirmative_button(palette),
    );

    let no_rect = if evasion.has_moved() {
        // Top-left corner at centre + offset, like a fixed-position element.
        let position = evasion.position_in(app.viewport());
        let col = (position.x / CELL_WIDTH_PX).floor().max(0.0) as u16;
        let row = (position.y / CELL_HEIGHT_PX).floor().max(0.0) as u16;
        Rect::new(
            area.x.saturating_add(col),
            area.y.saturating_add(row),
            no_width,
            no_height,
        )
    } else {
        Rect::new(
            pair_left + yes_width + BUTTON_GAP,
            row_y + (button_row_height.saturating_sub(no_height)) / 2,
            no_width,
            no_height,
        )
    };
    let no_rect = clamp_into(no_rect, area);
    draw_button(
        buf,
        no_rect,
        no_label,
        styles::negative_button(palette, evasion.is_dimmed()),
    );

    HitRegions {
        affirmative: Some(to_hit_region(yes_rect)),
        negative: Some(to_hit_region(no_rect)),
    }
}

fn title_line(line: &str, palette: &Palette) -> Line<'static> {
    // Highlight the "Sant Valentí" part wherever it landed after wrapping.
    let base = styles::title(palette);
    let highlight = styles::highlight(palette);
    let mut spans = Vec::new();
    let mut rest = line;
    while let Some(index) = rest.find(copy::QUESTION_HIGHLIGHT) {
        if index > 0 {
            spans.push(Span::styled(rest[..index].to_string(), base));
        }
        spans.push(Span::styled(copy::QUESTION_HIGHLIGHT, highlight));
        rest = &rest[index + copy::QUESTION_HIGHLIGHT.len()..];
    }
    if spans.is_empty() {
        // Wrapped mid-phrase: colour each half.
        for word in rest.split_inclusive(' ') {
            let bare = word.trim().trim_end_matches(['?', ',']);
            let style = if copy::QUESTION_HIGHLIGHT.split(' ').any(|part| part == bare) {
                highlight
            } else {
                base
            };
            spans.push(Span::styled(word.to_string(), style));
        }
        return Line::from(spans);
    }
    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), base));
    }
    Line::from(spans)
}

fn to_hit_region(rect: Rect) -> HitRegion {
    HitRegion::new(rect.x, rect.y, rect.width, rect.height)
}

/// A button: bordered when there is room, otherwise a solid bar.
fn draw_button(buf: &mut Buffer, rect: Rect, label: &str, style: Style) {
    if rect.is_empty() {
        return;
    }
    buf.set_style(rect, style);

    let bordered = rect.height >= 3 && rect.width >= 4;
    let (inner, border_style) = if bordered {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style);
        let inner = block.inner(rect);
        block.render(rect, buf);
        (inner, style)
    } else {
        (rect, style)
    };

    let text = fit_label(label, inner.width);
    let row = inner.y + inner.height.saturating_sub(1) / 2;
    let text_rect = centered_at(inner, row, text_width(&text), 1);
    put_str(buf, text_rect.x, row, &text, border_style);
}

// ============================================================================
// Loading screen
// ============================================================================

fn draw_loading(frame: &mut Frame, app: &App, palette: &Palette, glyphs: &Glyphs) {
    let area = frame.area();
    let options = app.ui_options();
    let tick = app.tick_count();
    let spinner = spinner_frame(tick / SPINNER_DIVISOR, options);

    let message_lines = wrap_words(copy::LOADING, area.width.saturating_sub(4).max(1));
    let height = 2 + message_lines.len() as u16;
    let top = area.y + area.height.saturating_sub(height) / 2;
    let buf = frame.buffer_mut();

    let spinner_line = Line::from(vec![
        Span::styled(spinner, Style::default().fg(palette.pink_faint)),
        Span::raw(" "),
        Span::styled(
            glyphs.heart,
            Style::default()
                .fg(palette.red)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(spinner, Style::default().fg(palette.pink)),
    ]);
    let rect = centered_at(area, top, spinner_line.width() as u16, 1);
    put_line(buf, rect.x, top, &spinner_line, rect.width);

    let mut style = Style::default().fg(palette.pink_deep);
    if pulse_on(tick, options.reduced_motion) {
        style = style.add_modifier(Modifier::BOLD);
    }
    centered_lines(buf, area, top + 2, &message_lines, style);
}

// ============================================================================
// Celebration screen
// ============================================================================

fn draw_celebration(frame: &mut Frame, app: &App, palette: &Palette, glyphs: &Glyphs) {
    let area = frame.area();
    let options = app.ui_options();

    let card_width = area
        .width
        .saturating_sub(4)
        .clamp(1, CELEBRATION_CARD_MAX_WIDTH);
    let inner_width = card_width.saturating_sub(2 + 2 * CARD_PADDING_X).max(1);
    let message_width = inner_width.saturating_sub(4).max(1);

    let title = if options.ascii_only {
        copy::CELEBRATION_TITLE_ASCII
    } else {
        copy::CELEBRATION_TITLE
    };
    let title_lines = wrap_words(title, inner_width);
    let certificate_lines = wrap_words(copy::CERTIFICATE, inner_width);
    let message_lines = wrap_words(app.session().display_message(), message_width);
    let chips = chip_line(palette, glyphs);
    let chip_rows = if chips.width() as u16 > inner_width {
        3
    } else {
        1
    };
    let footer_lines = wrap_words(copy::CELEBRATION_FOOTER, inner_width);

    // stripe, blank, icons, blank, title, blank, certificate, blank,
    // message box, blank, chips, blank, footer
    let message_box_height = message_lines.len() as u16 + 2;
    let content_height = 1
        + 1
        + 1
        + 1
        + title_lines.len() as u16
        + 1
        + certificate_lines.len() as u16
        + 1
        + message_box_height
        + 1
        + chip_rows
        + 1
        + footer_lines.len() as u16;
    let card_height = (content_height + 2).min(area.height);
    let top = area.y + area.height.saturating_sub(card_height) / 2;
    let card = clamp_into(centered_at(area, top, card_width, card_height), area);

    frame.render_widget(Clear, card);
    frame.render_widget(card_block(palette), card);

    let inner = Rect::new(
        card.x + 1 + CARD_PADDING_X,
        card.y + 1,
        inner_width.min(card.width.saturating_sub(2)),
        card.height.saturating_sub(2),
    )
    .intersection(area);
    let buf = frame.buffer_mut();
    let mut y = inner.y;

    // Gradient stripe across the top of the card.
    let stripe_width = card.width.saturating_sub(2);
    for i in 0..stripe_width {
        let color = if (i / 4) % 2 == 0 {
            palette.pink_soft
        } else {
            palette.red
        };
        put_str(buf, card.x + 1 + i, y, glyphs.stripe, Style::default().fg(color));
    }
    y += 2;

    let icons = Line::from(vec![
        Span::styled(
            glyphs.heart,
            Style::default()
                .fg(palette.red)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(glyphs.party, Style::default().fg(palette.yellow)),
    ]);
    let rect = centered_at(inner, y, icons.width() as u16, 1);
    put_line(buf, rect.x, y, &icons, rect.width);
    y += 2;

    y += centered_lines(buf, inner, y, &title_lines, styles::highlight(palette)) + 1;
    y += centered_lines(
        buf,
        inner,
        y,
        &certificate_lines,
        Style::default()
            .fg(palette.pink_soft)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    ) + 1;

    // Message box.
    if y < inner.bottom() {
        let box_rect = clamp_into(Rect::new(inner.x, y, inner.width, message_box_height), inner);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.pink_border))
            .style(Style::default().bg(palette.bg_message));
        let text_area = block.inner(box_rect);
        block.render(box_rect, buf);
        let lines: Vec<Line> = message_lines
            .iter()
            .map(|line| Line::from(line.clone()))
            .collect();
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(palette.pink_deep)
                    .bg(palette.bg_message)
                    .add_modifier(Modifier::ITALIC),
            )
            .render(text_area, buf);
    }
    y += message_box_height + 1;

    // Chips: on one line when they fit, stacked otherwise.
    if chip_rows == 1 {
        let rect = centered_at(inner, y, chips.width() as u16, 1);
        if y < inner.bottom() {
            put_line(buf, rect.x, y, &chips, rect.width);
        }
    } else {
        for (offset, span) in chips
            .spans
            .iter()
            .filter(|span| !span.content.trim().is_empty())
            .enumerate()
        {
            let row = y + offset as u16;
            if row >= inner.bottom() {
                break;
            }
            let line = Line::from(span.clone());
            let rect = centered_at(inner, row, line.width() as u16, 1);
            put_line(buf, rect.x, row, &line, rect.width);
        }
    }
    y += chip_rows + 1;

    let mut footer_style = Style::default().fg(palette.pink_faint);
    if pulse_on(app.tick_count(), options.reduced_motion) {
        footer_style = footer_style.add_modifier(Modifier::BOLD);
    }
    centered_lines(buf, inner, y, &footer_lines, footer_style);
}

fn chip_line(palette: &Palette, glyphs: &Glyphs) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{} {}", glyphs.music, copy::CHIP_MUSIC),
            styles::chip(palette.red),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{} {}", glyphs.gift, copy::CHIP_KISSES),
            styles::chip(palette.pink),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{} {}", glyphs.stars, copy::CHIP_FUTURE),
            styles::chip(palette.yellow),
        ),
    ])
}
