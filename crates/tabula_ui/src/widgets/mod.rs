pub mod buttons;
pub mod filter_bar;
pub mod hotkey;
pub mod hotkey_view;
pub mod modal;
pub mod pager;
pub mod search_filter;
pub mod status_line;
pub mod table;
pub mod text_input;
pub mod top_bar_view;

pub use status_line::StatusLine;
use unicode_width::UnicodeWidthStr;

/// Widest a column grows before its cells are cut off
pub const MAX_COLUMN_WIDTH: usize = 40;

/// Display width of each column: the widest of its header and of every
/// line of its cells, capped at [`MAX_COLUMN_WIDTH`]
pub fn column_widths<'a>(
    headers: &[String],
    rows: impl IntoIterator<Item = &'a Vec<String>>,
) -> Vec<u16> {
    let mut widths = headers
        .iter()
        .map(|header| UnicodeWidthStr::width(header.as_str()))
        .collect::<Vec<usize>>();

    for cells in rows {
        for (max_width, cell) in widths.iter_mut().zip(cells) {
            let width = cell
                .lines()
                .map(UnicodeWidthStr::width)
                .max()
                .unwrap_or(0);
            *max_width = (*max_width).max(width);
        }
    }

    widths
        .into_iter()
        .map(|width| {
            u16::try_from(width.min(MAX_COLUMN_WIDTH)).unwrap_or(u16::MAX)
        })
        .collect()
}
