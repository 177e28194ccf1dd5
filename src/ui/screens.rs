//! One render function per wizard state
//!
//! Screens only read the session. Layout is in absolute pixels, tuned for a
//! 1280x720 console but usable down to 640x480.

use super::font::GLYPH_WIDTH;
use super::surface::{text_width, wrap_chars, Surface};
use super::theme::UiColors;
use crate::mapping::{Binding, MappingTable, Slot, SLOT_COUNT};
use crate::wizard::{ReviewItem, WizardSession, WizardState, REVIEW_ROWS};

/// Size of the joystick drawing on the capture screen
pub const JOY_WIDTH: i32 = 600;
pub const JOY_HEIGHT: i32 = 300;

const HEADER_HEIGHT: i32 = 36;
const ROW_HEIGHT: i32 = 24;
const MARGIN: i32 = 50;

fn header(surface: &mut Surface, title: &str) {
    surface.fill_rect(0, 0, surface.width() as i32, HEADER_HEIGHT, UiColors::HEADER_BG);
    surface.draw_text(16, 10, title, UiColors::TEXT_TITLE, 1);
}

fn separator(surface: &mut Surface, y: i32) {
    let width = surface.width() as i32 - 2 * MARGIN;
    surface.fill_rect(MARGIN, y, width, 1, UiColors::BORDER);
}

fn selection_bar(surface: &mut Surface, y: i32) {
    let width = surface.width() as i32 - 2 * MARGIN;
    surface.fill_rect(MARGIN, y - 2, width, 22, UiColors::SELECTED);
}

/// Draws `text` wrapped at the screen margins, returns the y below it.
fn wrapped(surface: &mut Surface, mut y: i32, text: &str, color: u32, line_step: i32) -> i32 {
    let columns = (surface.width() as i32 - 120) / GLYPH_WIDTH;
    for line in wrap_chars(text, columns.max(1) as usize) {
        surface.draw_text(60, y, &line, color, 1);
        y += line_step;
    }
    y
}

/// Color of one joystick element while capturing.
///
/// The element being captured blinks in the highlight color; bound elements are
/// drawn green.
pub fn element_color(
    table: &MappingTable,
    capturing: Option<Slot>,
    slot: Slot,
    base: u32,
    blink: bool,
) -> u32 {
    if capturing == Some(slot) && blink {
        UiColors::HIGHLIGHT
    } else if table.get(slot).is_mapped() {
        UiColors::MAPPED
    } else {
        base
    }
}

/// The stick ball stands for two slots at once.
pub fn stick_color(table: &MappingTable, capturing: Option<Slot>, blink: bool) -> u32 {
    let capturing_stick = capturing.is_some_and(Slot::is_axis);
    let horizontal = table.get(Slot::LeftRight).is_mapped();
    let vertical = table.get(Slot::UpDown).is_mapped();
    match (capturing_stick && blink, horizontal, vertical) {
        (true, _, _) => UiColors::HIGHLIGHT,
        (false, true, true) => UiColors::MAPPED,
        (false, true, false) | (false, false, true) => UiColors::STICK_PARTIAL,
        (false, false, false) => UiColors::STICK_TOP,
    }
}

pub fn draw_joystick(
    surface: &mut Surface,
    table: &MappingTable,
    capturing: Option<Slot>,
    blink: bool,
    ox: i32,
    oy: i32,
) {
    let color = |slot: Slot, base: u32| element_color(table, capturing, slot, base, blink);

    surface.fill_rounded_rect(ox + 33, oy + 53, 540, 180, 20, UiColors::BODY_DARK);
    surface.fill_rounded_rect(ox + 30, oy + 50, 540, 180, 20, UiColors::BODY);

    let fire_buttons = [
        (Slot::LeftFire, 38, "L.Fire"),
        (Slot::RightFire, 454, "R.Fire"),
    ];
    for (slot, x, label) in fire_buttons {
        surface.fill_rounded_rect(ox + x, oy + 100, 108, 40, 10, color(slot, UiColors::BTN_FIRE));
        surface.draw_text_centered(ox + x + 54, oy + 108, label, UiColors::TEXT, 1);
    }

    surface.fill_circle(ox + 220, oy + 135, 50, UiColors::STICK_BASE);
    surface.fill_rect(ox + 213, oy + 60, 14, 75, UiColors::STICK);
    surface.fill_circle(ox + 220, oy + 55, 22, stick_color(table, capturing, blink));

    match capturing {
        Some(Slot::LeftRight) => {
            surface.draw_text(ox + 155, oy + 48, "<", UiColors::HIGHLIGHT, 2);
            surface.draw_text(ox + 262, oy + 48, ">", UiColors::HIGHLIGHT, 2);
        }
        Some(Slot::UpDown) => {
            surface.draw_text_centered(ox + 220, oy + 15, "^", UiColors::HIGHLIGHT, 2);
            surface.draw_text_centered(ox + 220, oy + 185, "v", UiColors::HIGHLIGHT, 2);
        }
        _ => {}
    }

    let triangles = [
        (Slot::LeftTriangle, 290, "L.Tri"),
        (Slot::RightTriangle, 365, "R.Tri"),
    ];
    for (slot, x, label) in triangles {
        let (cx, cy) = (ox + x, oy + 205);
        surface.fill_triangle(
            (cx, cy - 16),
            (cx - 14, cy + 10),
            (cx + 14, cy + 10),
            color(slot, UiColors::BTN),
        );
        surface.draw_text_centered(cx, cy + 16, label, UiColors::TEXT, 1);
    }

    let (mw, mh, gap) = (50, 22, 10);
    let sx = ox + (JOY_WIDTH - (4 * mw + 3 * gap)) / 2;
    let sy = oy + 248;
    let menus = [
        (Slot::Menu1, "M1"),
        (Slot::Menu2, "M2"),
        (Slot::Menu3, "M3"),
        (Slot::Menu4, "M4"),
    ];
    for (i, (slot, label)) in menus.into_iter().enumerate() {
        let mx = sx + i as i32 * (mw + gap);
        surface.fill_rounded_rect(mx, sy, mw, mh, 6, color(slot, UiColors::BTN));
        surface.draw_text_centered(mx + mw / 2, sy + 3, label, UiColors::TEXT, 1);
    }

    surface.draw_text_centered(ox + 220, oy + 190, "Stick", UiColors::TEXT_DIM, 1);
}

pub fn render_detect(session: &WizardSession, surface: &mut Surface) {
    let cx = surface.width() as i32 / 2;

    surface.draw_text_centered(cx, 60, "THEC64 GAMEPAD MAPPER", UiColors::TEXT_TITLE, 3);
    surface.draw_text_centered(cx, 180, "Press any button on the controller", UiColors::TEXT, 2);
    surface.draw_text_centered(cx, 220, "you want to map", UiColors::TEXT, 2);

    let y = 320;
    let controllers = session.controllers();
    if controllers.is_empty() {
        surface.draw_text_centered(
            cx,
            y,
            "No controllers detected. Connect a USB controller.",
            UiColors::TEXT_DIM,
            1,
        );
        return;
    }

    surface.draw_text_centered(cx, y - 30, "Detected controllers:", UiColors::TEXT, 1);
    for (i, controller) in controllers.iter().enumerate() {
        let line = format!(
            "{}. {}  [{}]",
            i + 1,
            controller.profile.name,
            controller.path.display()
        );
        surface.draw_text(100, y + i as i32 * ROW_HEIGHT, &line, UiColors::TEXT, 1);
    }
}

pub fn render_capture(session: &WizardSession, surface: &mut Surface, blink: bool) {
    let Some(profile) = session.selected_profile() else {
        return;
    };
    let width = surface.width() as i32;
    let cx = width / 2;
    let slot = session.current_slot();

    let title = format!(
        "Mapping: {} ({}/{})",
        profile.name,
        slot.map_or(SLOT_COUNT, |slot| slot.index() + 1),
        SLOT_COUNT
    );
    header(surface, &title);
    let guid = format!("GUID: {}", profile.guid);
    surface.draw_text(width - text_width(&guid, 1) - 16, 10, &guid, UiColors::TEXT_DIM, 1);

    let jy = 50;
    draw_joystick(surface, session.table(), slot, blink, cx - JOY_WIDTH / 2, jy);

    let py = jy + JOY_HEIGHT + 20;
    if let Some(slot) = slot {
        let prompt = format!(">>> {} <<<", slot.prompt());
        let color = if blink { UiColors::HIGHLIGHT } else { UiColors::TEXT };
        surface.draw_text_centered(cx, py, &prompt, color, 2);

        let detail = if session.is_redo() {
            format!("redo: {} ({})", slot.label(), slot.record_name())
        } else {
            format!("for: {} ({})", slot.label(), slot.record_name())
        };
        surface.draw_text_centered(cx, py + 40, &detail, UiColors::TEXT_DIM, 1);
    }

    let mut y = py + 70;
    surface.draw_text(100, y, "Mapped so far:", UiColors::TEXT_DIM, 1);
    y += 20;
    for (mapped, binding) in session.table().iter() {
        if !binding.is_mapped() {
            continue;
        }
        let line = format!("  {} = {}", mapped.record_name(), binding.record_value());
        surface.draw_text(100, y, &line, UiColors::MAPPED, 1);
        y += 18;
    }
}

fn binding_cell(binding: Binding) -> String {
    match binding {
        Binding::Unmapped => "(none)".to_string(),
        bound => bound.to_string(),
    }
}

pub fn render_review(session: &WizardSession, surface: &mut Surface) {
    let table = session.table();
    let cursor = session.review_cursor();
    header(surface, "Review Mappings");

    let has_duplicates = table.has_duplicates();
    let mut y = 50;
    surface.draw_text(60, y, "THE64 Input", UiColors::TEXT_DIM, 1);
    surface.draw_text(260, y, "Mapped To", UiColors::TEXT_DIM, 1);
    surface.draw_text(460, y, "gamecontrollerdb", UiColors::TEXT_DIM, 1);
    if has_duplicates {
        surface.draw_text(660, y, "Duplicate Assignment", UiColors::TEXT_DIM, 1);
    }
    y += ROW_HEIGHT;
    separator(surface, y);
    y += 8;

    for (slot, binding) in table.iter() {
        let selected = slot.index() == cursor;
        if selected {
            selection_bar(surface, y);
        }
        let text = if selected { UiColors::TEXT_TITLE } else { UiColors::TEXT };
        surface.draw_text(60, y, slot.label(), text, 1);
        surface.draw_text(260, y, &binding_cell(binding), text, 1);
        let field = format!("{}:{}", slot.record_name(), binding.record_value());
        surface.draw_text(460, y, &field, UiColors::MAPPED, 1);

        let duplicates = table.duplicates_of(slot);
        if !duplicates.is_empty() {
            let names: Vec<&str> = duplicates.iter().map(|other| other.label()).collect();
            surface.draw_text(660, y, &names.join(", "), UiColors::ERROR, 1);
        }
        y += ROW_HEIGHT;
    }

    y += 12;
    separator(surface, y);
    y += 10;

    for row in SLOT_COUNT..REVIEW_ROWS {
        let Some(item) = ReviewItem::from_row(row) else {
            continue;
        };
        let Some((label, key)) = item.action() else {
            continue;
        };
        let selected = row == cursor;
        if selected {
            selection_bar(surface, y);
        }
        let color = match (selected, item) {
            (true, _) => UiColors::TEXT_TITLE,
            (false, ReviewItem::Save) => UiColors::SUCCESS,
            (false, ReviewItem::Restart) => UiColors::HIGHLIGHT,
            (false, ReviewItem::Quit) => UiColors::ERROR,
            (false, _) => UiColors::TEXT,
        };
        surface.draw_text(70, y, &format!("[{}] {}", key, label), color, 1);
        y += ROW_HEIGHT;
    }

    y += 6;
    separator(surface, y);
    y += 8;
    surface.draw_text(
        60,
        y,
        "Keyboard: Arrows=Navigate  Right/Enter=Redo  1=Redo sel  2=Save  3=Restart  4=Another  Q=Quit",
        UiColors::TEXT_DIM,
        1,
    );
    y += 16;
    surface.draw_text(
        60,
        y,
        "Controller: Stick=Navigate  Right=Redo  LFire/A=Confirm  B=Redo  Start=Save",
        UiColors::TEXT_DIM,
        1,
    );

    if let Some(saved) = session.saved() {
        y += 16;
        let line = format!(
            "Saved to {} at {}",
            saved.path.display(),
            saved.saved_at.format("%H:%M:%S")
        );
        surface.draw_text_clipped(60, y, &line, UiColors::SUCCESS, surface.width() as i32 - 120);
    }

    if let Some(profile) = session.selected_profile() {
        y += ROW_HEIGHT;
        surface.draw_text(60, y, &format!("GUID: {}", profile.guid), UiColors::TEXT, 1);
    }
    y += ROW_HEIGHT;
    wrapped(surface, y, session.record(), UiColors::TEXT_DIM, 16);
}

pub fn render_browse(session: &WizardSession, surface: &mut Surface) {
    let Some(browser) = session.browser() else {
        return;
    };
    let width = surface.width() as i32;
    header(surface, "Select Export Directory");

    let mut y = 50;
    let current = format!("Current: {}/", browser.path().display());
    surface.draw_text_clipped(60, y, &current, UiColors::TEXT, width - 120);
    y += 30;
    separator(surface, y);
    y += 8;

    for (index, entry) in browser.visible() {
        let selected = index == browser.selected();
        if selected {
            selection_bar(surface, y);
        }
        if entry.is_directory() {
            let color = if selected { UiColors::TEXT_TITLE } else { UiColors::TEXT };
            surface.draw_text(70, y, &format!("[{}]", entry.label()), color, 1);
        } else {
            let color = if selected { UiColors::TEXT_TITLE } else { UiColors::SUCCESS };
            surface.draw_text(70, y, entry.label(), color, 1);
        }
        y += ROW_HEIGHT;
    }

    let mut hy = surface.height() as i32 - 80;
    if let Some(error) = session.export_error() {
        surface.draw_text_clipped(60, hy - 24, error, UiColors::ERROR, width - 120);
    }
    separator(surface, hy);
    hy += 12;
    surface.draw_text(
        60,
        hy,
        "Controller: Up/Down=Navigate  LFire/A=Select  B=Go up  Start=Back",
        UiColors::TEXT_DIM,
        1,
    );
    hy += 16;
    surface.draw_text(
        60,
        hy,
        "Keyboard: Arrows=Navigate  Enter=Select  Left/Bksp=Go up  Q/Esc=Back",
        UiColors::TEXT_DIM,
        1,
    );

    if let Some(profile) = session.selected_profile() {
        hy += 20;
        let target = format!(
            "File will be saved as: {}/{}.txt",
            browser.path().display(),
            profile.guid
        );
        surface.draw_text_clipped(60, hy, &target, UiColors::TEXT_DIM, width - 120);
    }
}

pub fn render_done(session: &WizardSession, surface: &mut Surface) {
    let cx = surface.width() as i32 / 2;
    let mut y = 80;

    surface.draw_text_centered(cx, y, "Mapping Saved!", UiColors::SUCCESS, 3);
    y += 80;
    if let Some(saved) = session.saved() {
        let line = format!("File: {}", saved.path.display());
        surface.draw_text_centered(cx, y, &line, UiColors::TEXT, 1);
    }

    y += 40;
    surface.draw_text(60, y, "Contents:", UiColors::TEXT_DIM, 1);
    y += ROW_HEIGHT;
    y = wrapped(surface, y, session.record(), UiColors::TEXT, 18);

    y += 30;
    surface.draw_text_centered(cx, y, "Press any button to exit", UiColors::TEXT_DIM, 2);
}

/// Paints the screen for the session's current state.
pub fn render(session: &WizardSession, surface: &mut Surface, blink: bool) {
    surface.clear(UiColors::BG);
    match session.state() {
        WizardState::Detect => render_detect(session, surface),
        WizardState::Capture => render_capture(session, surface, blink),
        WizardState::Review => render_review(session, surface),
        WizardState::Browse => render_browse(session, surface),
        WizardState::Done => render_done(session, surface),
        WizardState::Exit => surface.clear(UiColors::BLACK),
    }
}
