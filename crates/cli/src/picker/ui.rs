use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::cursor::{self, MoveTo};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use crossterm::style::Color::{DarkBlue, DarkGreen, DarkGrey, Red, Reset, Yellow};
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{queue, terminal, ExecutableCommand};

use vexel_dev_core::catalog::Catalog;
use vexel_dev_core::error::Result;
use vexel_dev_core::selection::{Selection, Toggle};

use super::query::{QueryEngine, RenderList};
use super::types::CycleDirection::{Down, Up};
use super::types::{CycleDirection, DisplayRow, PickerOutcome, UiState, ViewportState};

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
        let mut stdout = stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(cursor::Show);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}

/// Runs one interactive picker session over `catalog`, starting from
/// `defaults`.
///
/// The session is single-threaded and event-driven: each key event is fully
/// processed (including any query recomputation) before the next is read.
///
/// # Errors
///
/// Returns an error only for terminal I/O failures; user cancellation is a
/// normal [`PickerOutcome::Cancelled`] outcome.
pub fn run_picker(prompt: &str, catalog: &Catalog, defaults: Selection) -> Result<PickerOutcome> {
    let mut stdout = stdout();
    stdout.execute(EnterAlternateScreen)?;
    enable_raw_mode()?;

    let _raw_mode_guard = RawModeGuard; // When this goes out of scope, raw mode and mouse capture is disabled
    stdout.execute(EnableMouseCapture)?;
    stdout.execute(cursor::Hide)?;

    let mut selection = defaults;
    let mut engine = QueryEngine::new();
    let mut list = RenderList::default();
    list.apply(engine.source("", catalog, &selection));

    let (width, height) = terminal::size()?;
    let mut ui_state = UiState {
        pointer: first_entry_row(list.rows()).unwrap_or(0),
        viewport: ViewportState {
            offset: 0,
            height: height.saturating_sub(2), // Subtract 2 for header and search line
            width,
        },
        query: String::new(),
    };

    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            redraw_ui(prompt, &ui_state, list.rows(), &selection)?;
            needs_redraw = false;
        }

        if !event::poll(Duration::from_millis(500))? {
            continue;
        }

        match event::read()? {
            Event::Key(key_event) => match key_event.code {
                KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(PickerOutcome::Cancelled);
                }
                KeyCode::Esc => return Ok(PickerOutcome::Cancelled),
                KeyCode::Enter => return Ok(PickerOutcome::Confirmed(selection)),
                KeyCode::Up => {
                    ui_state = move_pointer(&ui_state, list.rows(), Up);
                    needs_redraw = true;
                }
                KeyCode::Down => {
                    ui_state = move_pointer(&ui_state, list.rows(), Down);
                    needs_redraw = true;
                }
                KeyCode::Char(' ') => {
                    if toggle_pointer_entry(
                        &mut selection,
                        &mut engine,
                        &mut list,
                        catalog,
                        &mut ui_state,
                    ) {
                        needs_redraw = true;
                    }
                }
                KeyCode::Backspace => {
                    if ui_state.query.pop().is_some() {
                        refresh_rows(&mut engine, &mut list, catalog, &selection, &mut ui_state);
                        needs_redraw = true;
                    }
                }
                KeyCode::Char(c) => {
                    ui_state.query.push(c);
                    refresh_rows(&mut engine, &mut list, catalog, &selection, &mut ui_state);
                    needs_redraw = true;
                }
                _ => {}
            },
            Event::Mouse(MouseEvent {
                kind, modifiers, ..
            }) => {
                if modifiers == KeyModifiers::NONE {
                    let direction = match kind {
                        MouseEventKind::ScrollUp => Some(Up),
                        MouseEventKind::ScrollDown => Some(Down),
                        _ => None,
                    };
                    if let Some(direction) = direction {
                        ui_state = move_pointer(&ui_state, list.rows(), direction);
                        needs_redraw = true;
                    }
                }
            }
            Event::Resize(width, height) => {
                ui_state = handle_resize(width, height, &ui_state, list.len());
                needs_redraw = true;
            }
            _ => {}
        }
    }
}

/// Toggles the entry under the pointer. Returns whether anything changed.
fn toggle_pointer_entry(
    selection: &mut Selection,
    engine: &mut QueryEngine,
    list: &mut RenderList,
    catalog: &Catalog,
    ui_state: &mut UiState,
) -> bool {
    let Some(entry) = list
        .rows()
        .get(ui_state.pointer)
        .and_then(DisplayRow::entry)
        .cloned()
    else {
        return false;
    };

    let is_marker = entry.is_group_marker();
    match selection.toggle(entry) {
        Toggle::Rejected => false,
        Toggle::Added | Toggle::Removed => {
            if is_marker {
                // Pool membership changed: the group's items enter or leave
                // the pool, so the rows are rebuilt immediately.
                refresh_rows(engine, list, catalog, selection, ui_state);
            }
            true
        }
    }
}

/// Recomputes the rows for the current query and re-clamps the pointer.
fn refresh_rows(
    engine: &mut QueryEngine,
    list: &mut RenderList,
    catalog: &Catalog,
    selection: &Selection,
    ui_state: &mut UiState,
) {
    if list.apply(engine.source(&ui_state.query, catalog, selection)) {
        ui_state.pointer = clamp_pointer(list.rows(), ui_state.pointer);
        let height = ui_state.viewport.height as usize;
        if height > 0 && ui_state.pointer < ui_state.viewport.offset {
            ui_state.viewport.offset = ui_state.pointer;
        }
        if ui_state.viewport.offset >= list.len() {
            ui_state.viewport.offset = 0;
        }
    }
}

/// First selectable row, if any.
fn first_entry_row(rows: &[DisplayRow]) -> Option<usize> {
    rows.iter().position(|row| !row.is_separator())
}

/// Moves a possibly out-of-range pointer onto the nearest selectable row.
fn clamp_pointer(rows: &[DisplayRow], pointer: usize) -> usize {
    if rows.is_empty() {
        return 0;
    }
    let start = pointer.min(rows.len() - 1);
    if !rows[start].is_separator() {
        return start;
    }
    rows[start..]
        .iter()
        .position(|row| !row.is_separator())
        .map(|offset| start + offset)
        .or_else(|| rows[..start].iter().rposition(|row| !row.is_separator()))
        .unwrap_or(start)
}

/// Moves the pointer one selectable row in the given direction, wrapping
/// around and skipping separators, then scrolls the viewport to keep the
/// pointer visible.
fn move_pointer(ui_state: &UiState, rows: &[DisplayRow], direction: CycleDirection) -> UiState {
    let mut ui_state = ui_state.clone();
    let len = rows.len();
    if len == 0 {
        return ui_state;
    }

    let mut index = ui_state.pointer.min(len - 1);
    for _ in 0..len {
        index = match direction {
            Up => {
                if index == 0 {
                    len - 1
                } else {
                    index - 1
                }
            }
            Down => (index + 1) % len,
        };
        if !rows[index].is_separator() {
            break;
        }
    }
    ui_state.pointer = index;

    let height = ui_state.viewport.height as usize;
    if height > 0 {
        if index < ui_state.viewport.offset {
            ui_state.viewport.offset = index;
        } else if index >= ui_state.viewport.offset + height {
            ui_state.viewport.offset = index + 1 - height;
        }
    }

    ui_state
}

/// Handle window resize events
fn handle_resize(width: u16, height: u16, ui_state: &UiState, row_count: usize) -> UiState {
    let new_height = height.saturating_sub(2);
    let mut ui_state = ui_state.clone();
    let mut new_viewport = ViewportState {
        width,
        height: new_height,
        offset: ui_state.viewport.offset,
    };

    // If growing taller, try to show more items above current pointer
    match new_height.cmp(&ui_state.viewport.height) {
        std::cmp::Ordering::Greater if new_viewport.offset > 0 => {
            let height_increase = new_height - ui_state.viewport.height;
            new_viewport.offset = new_viewport.offset.saturating_sub(height_increase as usize);
        }
        std::cmp::Ordering::Less
            if new_height > 0 && ui_state.pointer >= new_viewport.offset + new_height as usize =>
        {
            new_viewport.offset = ui_state.pointer.saturating_sub(new_height as usize - 1);

            if new_viewport.offset + new_height as usize > row_count {
                new_viewport.offset = row_count.saturating_sub(new_height as usize);
            }
        }
        _ => {}
    }

    ui_state.viewport = new_viewport;
    ui_state
}

fn redraw_ui(
    prompt: &str,
    ui_state: &UiState,
    rows: &[DisplayRow],
    selection: &Selection,
) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    print_header(prompt, ui_state, selection.len())?;

    if rows.is_empty() {
        queue!(
            stdout,
            SetForegroundColor(Red),
            Print("No matching files!".to_string()),
            SetAttribute(Attribute::Reset),
            cursor::MoveToNextLine(1)
        )?;
    } else {
        print_rows_with_pointer(ui_state, rows, selection)?;
    }

    queue!(
        stdout,
        SetAttribute(Attribute::Bold),
        Print(format!("Search: {}", ui_state.query)),
        SetAttribute(Attribute::Reset)
    )?;

    stdout.flush()?;
    Ok(())
}

/// Print the header for the picker UI
fn print_header(prompt: &str, ui_state: &UiState, selected_count: usize) -> Result<()> {
    let mut stdout = stdout();
    let width = ui_state.viewport.width as usize;

    let left_padding_size = 2usize;
    let left_padding = " ".repeat(left_padding_size);

    let instructions = format!(
        "{prompt}   |   {selected_count} selected   |   <space>: Toggle   <enter>: Confirm   <esc>: Cancel"
    );

    let right_padding = " ".repeat(width.saturating_sub(left_padding_size + instructions.len()));

    queue!(
        stdout,
        MoveTo(0, 0),
        SetBackgroundColor(DarkGreen),
        Print(left_padding),
        Print(instructions),
        Print(right_padding),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
        cursor::MoveToNextLine(1),
    )?;

    Ok(())
}

/// Clear and write one row of the picker list
fn clear_and_write_row(
    row: u16,
    display_row: &DisplayRow,
    is_pointer: bool,
    selection: &Selection,
    terminal_width: u16,
) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, MoveTo(0, row), Clear(ClearType::CurrentLine))?;

    let content = match display_row {
        DisplayRow::Separator => "─".repeat((terminal_width as usize).clamp(1, 24)),
        DisplayRow::Entry(entry) => {
            let mark = if selection.contains(entry) { 'x' } else { ' ' };
            format!("[{mark}] {}", entry.display_name())
        }
    };

    let padding = if content.chars().count() < (terminal_width as usize) {
        " ".repeat(terminal_width as usize - content.chars().count())
    } else {
        String::new()
    };

    if is_pointer && !display_row.is_separator() {
        queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            SetBackgroundColor(DarkBlue),
            SetForegroundColor(Yellow),
        )?;
    } else if display_row.is_separator() {
        queue!(stdout, SetForegroundColor(DarkGrey))?;
    }

    queue!(stdout, Print(content), Print(padding))?;

    queue!(
        stdout,
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

/// Print the visible rows with the pointer row highlighted
fn print_rows_with_pointer(
    ui_state: &UiState,
    rows: &[DisplayRow],
    selection: &Selection,
) -> Result<()> {
    let mut stdout = stdout();
    let viewport = &ui_state.viewport;

    let visible_rows = rows
        .iter()
        .enumerate()
        .skip(viewport.offset)
        .take(viewport.height as usize);

    for (screen_index, (row_index, row)) in visible_rows.enumerate() {
        let is_pointer = row_index == ui_state.pointer;
        clear_and_write_row(
            screen_index as u16 + 1,
            row,
            is_pointer,
            selection,
            viewport.width,
        )?;
        queue!(stdout, cursor::MoveToNextLine(1))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vexel_dev_core::selection::SelectionEntry;

    fn rows() -> Vec<DisplayRow> {
        vec![
            DisplayRow::Separator,
            DisplayRow::Entry(SelectionEntry::item("unit", "a.js")),
            DisplayRow::Separator,
            DisplayRow::Entry(SelectionEntry::item("unit", "b.js")),
            DisplayRow::Entry(SelectionEntry::item("visual", "c.js")),
        ]
    }

    fn ui_state(pointer: usize) -> UiState {
        UiState {
            pointer,
            viewport: ViewportState {
                offset: 0,
                height: 10,
                width: 80,
            },
            query: String::new(),
        }
    }

    #[test]
    fn test_first_entry_row_skips_leading_separator() {
        assert_eq!(first_entry_row(&rows()), Some(1));
        assert_eq!(first_entry_row(&[]), None);
    }

    #[test]
    fn test_move_pointer_skips_separators() {
        let moved = move_pointer(&ui_state(1), &rows(), Down);
        assert_eq!(moved.pointer, 3);
    }

    #[test]
    fn test_move_pointer_wraps_around() {
        let moved = move_pointer(&ui_state(4), &rows(), Down);
        // Wraps past the leading separator onto the first entry.
        assert_eq!(moved.pointer, 1);

        let moved = move_pointer(&ui_state(1), &rows(), Up);
        assert_eq!(moved.pointer, 4);
    }

    #[test]
    fn test_move_pointer_scrolls_viewport_down() {
        let mut state = ui_state(3);
        state.viewport.height = 2;
        state.viewport.offset = 2;

        let moved = move_pointer(&state, &rows(), Down);
        assert_eq!(moved.pointer, 4);
        assert_eq!(moved.viewport.offset, 3);
    }

    #[test]
    fn test_clamp_pointer_handles_shrunken_lists() {
        assert_eq!(clamp_pointer(&rows(), 99), 4);
        assert_eq!(clamp_pointer(&[], 5), 0);
    }

    #[test]
    fn test_clamp_pointer_moves_off_separators() {
        // Pointer lands on the trailing-separator position after a refresh.
        assert_eq!(clamp_pointer(&rows(), 2), 3);
    }

    #[test]
    fn test_handle_resize_keeps_pointer_visible_when_shrinking() {
        let mut state = ui_state(4);
        state.viewport.height = 10;

        let resized = handle_resize(80, 4, &state, rows().len());
        assert_eq!(resized.viewport.height, 2);
        assert!(resized.viewport.offset + 2 > 4);
    }
}
