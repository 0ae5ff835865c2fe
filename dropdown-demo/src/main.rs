mod app;
mod data;
mod terminal;

use std::fs::File;
use std::io;

use crossterm::event::{Event, EventStream};
use dropdown::wakeup;
use futures::StreamExt;
use simplelog::{Config, LevelFilter, WriteLogger};

use app::{App, Flow};
use terminal::TerminalGuard;

#[tokio::main]
async fn main() -> io::Result<()> {
    let log_file = File::create("dropdown-demo.log")?;
    if let Err(err) = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file) {
        eprintln!("Failed to initialize logger: {}", err);
    }

    let mut app = App::new();
    let (wakeup_tx, mut wakeup_rx) = wakeup::channel();
    app.install_wakeup(wakeup_tx);

    let mut guard = TerminalGuard::new()?;
    let mut events = EventStream::new();
    app.draw(guard.stdout())?;

    loop {
        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => {
                    if app.handle_key(key) == Flow::Quit {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err),
                None => break,
            },
            // A dropdown changed without input; redraw below
            true = wakeup_rx.wait() => {}
        }
        app.draw(guard.stdout())?;
    }

    log::info!("Demo exited");
    Ok(())
}
