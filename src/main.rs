//! Escape Arcade entry point
//!
//! Headless host: runs the campaign at a fixed cadence for a short attract
//! run, pressing ESCAPE on the title screen and logging what it sees.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use escape_arcade::campaign::screens::ESCAPE_BUTTON;
    use escape_arcade::{Campaign, Clock, DrawList, InputSnapshot, MiniGame, Settings};

    env_logger::init();
    log::info!("Escape Arcade (headless) starting...");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });
    log::info!("Campaign seed: {}", seed);

    let mut campaign = Campaign::new(seed);
    let mut clock = Clock::new(settings.max_frame_delta);
    let mut draw_list = DrawList::new();

    let frame_budget = Duration::from_secs_f32(settings.frame_time());
    let total_frames = (settings.demo_seconds * settings.target_tps as f32).ceil() as u64;
    let escape = ESCAPE_BUTTON.center();

    let mut last = Instant::now();
    let mut screen = campaign.screen();
    let mut input = InputSnapshot::default();
    for frame_index in 0..total_frames {
        let started = Instant::now();
        let raw_dt = started.duration_since(last).as_secs_f32();
        last = started;

        if frame_index == 0 {
            input = InputSnapshot::click(escape.x, escape.y);
        }
        let frame = clock.advance(raw_dt, input);
        campaign.tick(&frame);
        input.clear_edges();

        draw_list.reset();
        campaign.draw(&mut draw_list);

        if campaign.screen() != screen {
            screen = campaign.screen();
            log::info!(
                "t={:.2}s {:?} ({}), {} draw commands",
                clock.now(),
                screen,
                campaign.active().map_or("-", |level| level.name()),
                draw_list.len()
            );
        }

        if let Some(rest) = frame_budget.checked_sub(started.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    log::info!(
        "Attract run over after {:.1}s on {:?}",
        clock.now(),
        campaign.screen()
    );
    campaign.shutdown();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host yet
}
