use rayon::ThreadPoolBuilder;
use std::error::Error;
use std::thread;
use std::time::Duration;
use tprint::tprint;

type Result<T> = std::result::Result<T, Box<dyn Error>>;

const WORKERS: u32 = 5;
const GREETINGS: u32 = 4;

fn main() -> Result<()> {
    tprint::set_color_enabled(true);

    // One pool thread per worker so that every worker gets its own color.
    let pool = ThreadPoolBuilder::new()
        .num_threads(WORKERS as usize)
        .build()?;

    pool.scope(|scope| {
        for n in 0..WORKERS {
            scope.spawn(|_| worker());
            // Stagger startup so greetings from different workers overlap.
            thread::sleep(Duration::from_millis(933) / (n + 3));
        }
    });

    tprint::print_range((1..=WORKERS).map(|n| format!("worker {} done", n)));
    Ok(())
}

fn worker() {
    for i in 0..GREETINGS {
        tprint!("hello from some thread");
        thread::sleep(Duration::from_millis(597) * i);
    }
}
