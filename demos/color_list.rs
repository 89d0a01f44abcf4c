//! Color List Demo: three colored rows, one renamed after three seconds.
//!
//! The rename reconciles to a single in-place update: no row is removed,
//! inserted or moved. Press 'r' to reverse the list and watch the rows
//! slide into place.
//!
//! Keys: Up/Down/PageUp/PageDown/Home/End scroll, 'r' reverses,
//! 'q' or Escape quits. Set `DIFFABLE_LOG=/path/to/file` to log.

use crossbeam_channel::{after, bounded, select};
use diffable::actor::{InputConfig, KeyCode};
use diffable::demo::{self, ColorItem, ItemId, Section, RENAME_DELAY};
use diffable::logging::{self, Profile};
use diffable::{InputActor, InputEvent, ListOwner, ListViewConfig, ReconcilerActor, TerminalList, TerminalSession};
use std::io::{self, Stdout};
use tracing::{info, warn};

type View = TerminalList<ItemId, Stdout>;

fn main() -> diffable::Result<()> {
    // stderr is hidden behind the alternate screen, so log to a file or not at all.
    if let Some(profile) = Profile::from_env() {
        logging::init(&profile)?;
    }

    let mut session = TerminalSession::start()?;
    let view = View::new(
        io::stdout(),
        ListViewConfig {
            width: session.width(),
            height: session.height(),
            ..ListViewConfig::default()
        },
    );

    let actor = ReconcilerActor::spawn(view);
    let mut owner: ListOwner<Section, ColorItem, _> =
        ListOwner::new(Section::Only, demo::starting_items(), actor.handle())?;
    info!(items = owner.items().len(), "color list started");

    let (input_tx, input_rx) = bounded::<InputEvent>(64);
    let input = InputActor::spawn(input_tx, &InputConfig::default());
    let rename = after(RENAME_DELAY);

    loop {
        select! {
            recv(input_rx) -> event => {
                let Ok(event) = event else { break };
                if event.is_quit() {
                    break;
                }
                match event {
                    InputEvent::Key { code: KeyCode::Char('r'), .. } => {
                        owner.update(|items| items.reverse())?;
                    }
                    InputEvent::Key { code, .. } => {
                        // Read the height now so page keys follow resizes.
                        if let Some(delta) = demo::scroll_delta(code, session.height()) {
                            owner.sink().with_presenter(move |view: &mut View| view.scroll_by(delta))?;
                        }
                    }
                    InputEvent::Scroll { delta } => {
                        let delta = -isize::from(delta);
                        owner.sink().with_presenter(move |view: &mut View| view.scroll_by(delta))?;
                    }
                    InputEvent::Resize { width, height } => {
                        session.handle_resize(width, height);
                        owner.sink().with_presenter(move |view: &mut View| view.resize(width, height))?;
                    }
                    InputEvent::Error(message) => warn!(%message, "input error"),
                    InputEvent::Shutdown => break,
                }
            }
            recv(rename) -> _ => {
                info!(to = demo::RENAMED_TO, "renaming row");
                owner.update(|items| demo::rename(items))?;
            }
        }
    }

    input.join();
    drop(owner);
    if let Some(mut view) = actor.join() {
        if let Some(err) = view.take_error() {
            warn!(error = %err, "terminal output failed");
        }
    }
    drop(session);
    Ok(())
}
