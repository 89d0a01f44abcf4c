//! `TerminalList`: a presenter that draws the collection as colored bands.
//!
//! Every frame is composed into one byte buffer and flushed to the writer in
//! a single `write_all`, so the terminal never shows a half-drawn list.
//!
//! Animated batches run in two halves:
//!
//! ```text
//! progress 0.0 ──────────── 0.5 ──────────────────────── 1.0
//!          removed rows fade     survivors slide to new slots,
//!          out in old layout     updated rows cross-fade,
//!                                inserted rows fade in
//! ```

use super::color::Rgb;
use super::row::{centred, ColorRow, RowContent, ROW_REUSE_TAG};
use crate::diff::Changeset;
use crate::error::ReconcileError;
use crate::pool::{CellPool, PoolStats};
use crate::reconciler::{CellCollection, Presenter, Transition, TransitionClock};
use crate::snapshot::Identifiable;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::io::{self, Write};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Configuration for the list view.
#[derive(Debug, Clone)]
pub struct ListViewConfig {
    /// Viewport width in columns.
    pub width: u16,
    /// Viewport height in lines.
    pub height: u16,
    /// Lines per row.
    pub row_height: u16,
    /// Color behind and between rows.
    pub background: Rgb,
    /// Label color; `None` picks black or white per row.
    pub text_color: Option<Rgb>,
}

impl Default for ListViewConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            row_height: 3,
            background: Rgb::BLACK,
            text_color: None,
        }
    }
}

/// Frame output statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    /// Frames flushed to the writer.
    pub frames: u64,
    /// Total bytes written.
    pub bytes_written: u64,
    /// Compose-and-flush time of the last frame in microseconds.
    pub last_frame_us: u64,
}

/// A committed row: identity plus the content its cell showed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFrame<K> {
    /// Item identity.
    pub id: K,
    /// Band color.
    pub color: Rgb,
    /// Label.
    pub title: String,
}

/// A band to paint, positioned in row units from the top of the content.
#[derive(Debug, Clone, PartialEq)]
struct Band<'a> {
    position: f32,
    color: Rgb,
    title: &'a str,
}

#[derive(Debug)]
struct ActiveTransition<K> {
    clock: TransitionClock,
    from: Vec<RowFrame<K>>,
}

/// Presenter drawing one band per item on a terminal writer.
pub struct TerminalList<K, W: Write> {
    out: W,
    config: ListViewConfig,
    rows: Vec<RowFrame<K>>,
    transition: Option<ActiveTransition<K>>,
    scroll: usize,
    pool: CellPool<ColorRow>,
    frame: Vec<u8>,
    stats: FrameStats,
    error: Option<io::Error>,
}

impl<K, W> TerminalList<K, W>
where
    K: Clone + Eq + Hash,
    W: Write,
{
    /// Create a list view drawing to `out`.
    pub fn new(out: W, config: ListViewConfig) -> Self {
        Self {
            out,
            config,
            rows: Vec::new(),
            transition: None,
            scroll: 0,
            pool: CellPool::new(),
            frame: Vec::with_capacity(16 * 1024),
            stats: FrameStats::default(),
            error: None,
        }
    }

    /// Rows as of the last commit.
    pub fn rows(&self) -> &[RowFrame<K>] {
        &self.rows
    }

    /// Configuration.
    pub const fn config(&self) -> &ListViewConfig {
        &self.config
    }

    /// First visible content line.
    pub const fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// Scroll by `delta` lines, clamped to the content, and redraw.
    pub fn scroll_by(&mut self, delta: isize) {
        let target = if delta < 0 {
            self.scroll.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll.saturating_add(delta.unsigned_abs())
        };
        let clamped = target.min(self.max_scroll());
        if clamped != self.scroll {
            self.scroll = clamped;
            self.redraw();
        }
    }

    /// Change the viewport size and redraw.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.config.width = width;
        self.config.height = height;
        self.scroll = self.scroll.min(self.max_scroll());
        self.redraw();
    }

    /// Draw the current state again.
    pub fn redraw(&mut self) {
        if self.transition.is_some() {
            self.draw(Some(Instant::now()));
        } else {
            self.draw(None);
        }
    }

    /// Whether an animated batch is still running.
    pub const fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Pool counters for row cells.
    pub const fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Row cells waiting for reuse.
    pub fn idle_cells(&self) -> usize {
        self.pool.idle_count(ROW_REUSE_TAG)
    }

    /// Frame output statistics.
    pub const fn frame_stats(&self) -> FrameStats {
        self.stats
    }

    /// The most recent write error, if any, clearing it.
    pub fn take_error(&mut self) -> Option<ReconcileError> {
        self.error.take().map(ReconcileError::from)
    }

    /// The underlying writer.
    pub const fn writer(&self) -> &W {
        &self.out
    }

    /// Consume the view and return its writer.
    pub fn into_writer(self) -> W {
        self.out
    }

    fn row_height(&self) -> u16 {
        self.config.row_height.max(1)
    }

    fn max_scroll(&self) -> usize {
        let content = self.rows.len() * usize::from(self.row_height());
        content.saturating_sub(usize::from(self.config.height))
    }

    /// Compose a frame (at `now` if a transition is running) and flush it.
    fn draw(&mut self, now: Option<Instant>) {
        let start = Instant::now();
        let bands = match (&self.transition, now) {
            (Some(active), Some(now)) => {
                transition_bands(&active.from, &self.rows, active.clock.progress(now), self.config.background)
            }
            _ => resting_bands(&self.rows),
        };

        self.frame.clear();
        let result = compose_frame(&mut self.frame, &bands, &self.config, self.scroll)
            .and_then(|()| flush_frame(&mut self.out, &self.frame));
        match result {
            Ok(()) => {
                self.stats.frames += 1;
                self.stats.bytes_written += self.frame.len() as u64;
                self.stats.last_frame_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
            }
            Err(err) => {
                warn!(error = %err, "frame write failed");
                self.error = Some(err);
            }
        }
    }
}

impl<S, T, W> Presenter<S, T> for TerminalList<T::Id, W>
where
    T: Identifiable + RowContent,
    W: Write,
{
    type Cell = ColorRow;

    fn render(&mut self, item: &T) -> ColorRow {
        let mut cell = self.pool.dequeue(ROW_REUSE_TAG, ColorRow::default);
        cell.configure(item);
        cell
    }

    fn update_content(&mut self, cell: &mut ColorRow, item: &T) {
        cell.configure(item);
    }

    fn remove_cell(&mut self, cell: ColorRow) {
        self.pool.release(ROW_REUSE_TAG, cell);
    }

    fn present(
        &mut self,
        cells: &CellCollection<S, T::Id, ColorRow>,
        changeset: &Changeset<S, T::Id>,
        transition: Transition,
    ) {
        if self.transition.take().is_some() {
            trace!("snapping in-flight transition");
        }

        let background = self.config.background;
        let rows = cells
            .iter()
            .map(|(_, slot)| RowFrame {
                id: slot.id.clone(),
                color: slot.cell.color.unwrap_or(background),
                title: slot.cell.title.clone(),
            })
            .collect();
        let previous = std::mem::replace(&mut self.rows, rows);
        self.scroll = self.scroll.min(self.max_scroll());

        match transition {
            Transition::Animated { duration } if !changeset.is_empty() => {
                let now = Instant::now();
                self.transition = Some(ActiveTransition {
                    clock: TransitionClock::start(now, duration),
                    from: previous,
                });
                self.draw(Some(now));
            }
            _ => self.draw(None),
        }
        debug!(rows = self.rows.len(), edits = changeset.len(), animated = self.transition.is_some(), "presented");
    }

    fn tick(&mut self, now: Instant) -> bool {
        let Some(active) = &self.transition else {
            return false;
        };
        if active.clock.is_finished(now) {
            self.transition = None;
            self.draw(None);
            false
        } else {
            self.draw(Some(now));
            true
        }
    }

    fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    fn finish_transition(&mut self) {
        if self.transition.take().is_some() {
            self.draw(None);
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn resting_bands<K>(rows: &[RowFrame<K>]) -> Vec<Band<'_>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| Band {
            position: index as f32,
            color: row.color,
            title: &row.title,
        })
        .collect()
}

/// Bands for a transition from `from` to `to` at `progress`.
///
/// Bands are returned in paint order; later bands cover earlier ones.
#[allow(clippy::cast_precision_loss)]
fn transition_bands<'a, K: Eq + Hash>(
    from: &'a [RowFrame<K>],
    to: &'a [RowFrame<K>],
    progress: f32,
    background: Rgb,
) -> Vec<Band<'a>> {
    if progress >= 1.0 {
        return resting_bands(to);
    }

    let staying: HashSet<&K> = to.iter().map(|row| &row.id).collect();
    if progress < 0.5 {
        let fade = progress * 2.0;
        return from
            .iter()
            .enumerate()
            .map(|(index, row)| {
                if staying.contains(&row.id) {
                    Band {
                        position: index as f32,
                        color: row.color,
                        title: &row.title,
                    }
                } else {
                    Band {
                        position: index as f32,
                        color: row.color.lerp(background, fade),
                        title: if fade < 0.5 { &row.title } else { "" },
                    }
                }
            })
            .collect();
    }

    let step = (progress - 0.5) * 2.0;
    // Survivors keyed by their slot once removed rows have closed up.
    let survivors: HashMap<&K, (usize, &RowFrame<K>)> = from
        .iter()
        .filter(|row| staying.contains(&row.id))
        .enumerate()
        .map(|(index, row)| (&row.id, (index, row)))
        .collect();

    let mut entering = Vec::new();
    let mut moving = Vec::new();
    for (index, row) in to.iter().enumerate() {
        if let Some(&(old_index, old)) = survivors.get(&row.id) {
            let start = old_index as f32;
            moving.push(Band {
                position: (index as f32 - start).mul_add(step, start),
                color: old.color.lerp(row.color, step),
                title: if step < 0.5 { &old.title } else { &row.title },
            });
        } else {
            entering.push(Band {
                position: index as f32,
                color: background.lerp(row.color, step),
                title: if step < 0.5 { "" } else { &row.title },
            });
        }
    }
    entering.extend(moving);
    entering
}

/// Compose a full frame for `bands` into `frame`.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn compose_frame(frame: &mut Vec<u8>, bands: &[Band<'_>], config: &ListViewConfig, scroll: usize) -> io::Result<()> {
    let height = usize::from(config.height);
    let row_height = config.row_height.max(1);
    let label_line = i64::from(row_height / 2);
    let mut lines: Vec<Option<(Rgb, Option<&str>)>> = vec![None; height];

    for band in bands {
        let top = (band.position * f32::from(row_height)).round() as i64 - scroll as i64;
        for offset in 0..i64::from(row_height) {
            let line = top + offset;
            if line < 0 || line >= height as i64 {
                continue;
            }
            let title = (offset == label_line).then_some(band.title);
            lines[line as usize] = Some((band.color, title));
        }
    }

    let blank = " ".repeat(usize::from(config.width));
    for (y, line) in lines.iter().enumerate() {
        let (color, title) = line.unwrap_or((config.background, None));
        queue!(frame, MoveTo(0, y as u16), SetBackgroundColor(color.into()))?;
        match title {
            Some(title) if !title.is_empty() => {
                let (column, shown) = centred(title, config.width);
                let text = config.text_color.unwrap_or_else(|| color.contrasting_text());
                let rest = usize::from(config.width)
                    .saturating_sub(usize::from(column) + unicode_width::UnicodeWidthStr::width(shown));
                queue!(
                    frame,
                    Print(&blank[..usize::from(column)]),
                    SetForegroundColor(text.into()),
                    Print(shown),
                    Print(&blank[..rest]),
                )?;
            }
            _ => queue!(frame, Print(&blank))?,
        }
    }
    queue!(frame, ResetColor)?;
    Ok(())
}

/// Flush a composed frame in a single write.
fn flush_frame<W: Write>(out: &mut W, frame: &[u8]) -> io::Result<()> {
    out.write_all(frame)?;
    out.flush()
}
