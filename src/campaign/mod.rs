//! Campaign controller: title screen, level queue and end screens
//!
//! Owns the whole run. Levels are played front to back from a fixed queue;
//! exactly one level is loaded at a time and it is unloaded as soon as it
//! reports an outcome.

pub mod screens;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::games::{FlappyGame, MazeGame, PlatformerGame, ShooterGame};
use crate::platform::Frame;
use crate::renderer::DrawList;
use crate::renderer::colors::BLACK;
use crate::sim::{GameRng, Level, MiniGame, Outcome};

use screens::{CONFIRM_BUTTON, ESCAPE_BUTTON, SUFFER_BUTTON, Toast};

/// Top-level screen of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Title,
    /// Between levels, waiting for "Ready!"
    Transition,
    Playing,
    Lost,
    Won,
}

/// One full run of the escape campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    screen: Screen,
    queue: VecDeque<Level>,
    active: Option<Level>,
    /// Cached for the transition screen
    next_name: String,
    next_instructions: String,
    toast: Toast,
    rng: GameRng,
}

impl Campaign {
    pub fn new(seed: u64) -> Self {
        Self {
            screen: Screen::Title,
            queue: VecDeque::new(),
            active: None,
            next_name: String::new(),
            next_instructions: String::new(),
            toast: Toast::default(),
            rng: GameRng::new(seed),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn active(&self) -> Option<&Level> {
        self.active.as_ref()
    }

    pub fn active_name(&self) -> Option<&'static str> {
        self.active.as_ref().map(|level| level.name())
    }

    /// Levels still waiting in the queue
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn next_level_name(&self) -> &str {
        &self.next_name
    }

    pub fn next_level_instructions(&self) -> &str {
        &self.next_instructions
    }

    pub fn toast_visible(&self) -> bool {
        self.toast.is_visible()
    }

    /// Serialized state, used to compare runs
    pub fn snapshot(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Build the level queue and start the first level
    pub fn start(&mut self) {
        self.release_active();
        self.queue = VecDeque::from([
            Level::Maze(MazeGame::new(self.rng.fork())),
            Level::Shooter(ShooterGame::new(self.rng.fork())),
            Level::Flappy(FlappyGame::new(self.rng.fork())),
            Level::Platformer(PlatformerGame::new()),
        ]);
        log::info!("Campaign started (seed {})", self.rng.seed());
        self.load_next();
    }

    /// Advance one host frame
    pub fn tick(&mut self, frame: &Frame) {
        match self.screen {
            Screen::Title => self.tick_title(frame),
            Screen::Playing => self.tick_playing(frame),
            Screen::Transition => {
                if frame
                    .input
                    .click_position()
                    .is_some_and(|p| CONFIRM_BUTTON.contains(p))
                {
                    self.load_next();
                }
            }
            Screen::Lost | Screen::Won => {
                if frame.input.enter_pressed {
                    self.toast.clear();
                    self.set_screen(Screen::Title);
                }
            }
        }
    }

    pub fn draw(&self, out: &mut DrawList) {
        out.clear_background(BLACK);
        match self.screen {
            Screen::Title => screens::draw_title(&self.toast, out),
            Screen::Playing => {
                if let Some(level) = &self.active {
                    level.draw(out);
                }
            }
            Screen::Transition => {
                screens::draw_transition(&self.next_name, &self.next_instructions, out)
            }
            Screen::Lost => screens::draw_lost(out),
            Screen::Won => screens::draw_won(out),
        }
    }

    /// Unload whatever level is still loaded
    pub fn shutdown(&mut self) {
        self.release_active();
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            log::info!("Screen {:?} -> {:?}", self.screen, screen);
            self.screen = screen;
        }
    }

    fn release_active(&mut self) {
        if let Some(mut level) = self.active.take() {
            level.unload();
            log::info!("Unloaded {}", level.name());
        }
    }

    fn tick_title(&mut self, frame: &Frame) {
        if let Some(p) = frame.input.click_position() {
            if ESCAPE_BUTTON.contains(p) {
                self.toast.clear();
                self.start();
            } else if SUFFER_BUTTON.contains(p) {
                log::debug!("Title toast shown");
                self.toast.show();
            }
        }
        self.toast.tick(frame.dt);
    }

    fn tick_playing(&mut self, frame: &Frame) {
        let Some(level) = self.active.as_mut() else {
            log::warn!("Playing with no active level, ending the run");
            self.set_screen(Screen::Lost);
            return;
        };

        level.tick(frame);
        let Some(outcome) = level.outcome() else {
            return;
        };
        log::info!("{} finished: {:?}", level.name(), outcome);
        self.release_active();

        match outcome {
            Outcome::Won => match self.queue.front() {
                Some(next) => {
                    self.next_name = next.name().to_string();
                    self.next_instructions = next.instructions().to_string();
                    self.set_screen(Screen::Transition);
                }
                None => {
                    log::info!("All levels cleared");
                    self.set_screen(Screen::Won);
                }
            },
            Outcome::Lost => self.set_screen(Screen::Lost),
        }
    }

    fn load_next(&mut self) {
        self.release_active();
        match self.queue.pop_front() {
            Some(mut level) => {
                level.load();
                log::info!("Loaded {}", level.name());
                self.active = Some(level);
                self.set_screen(Screen::Playing);
            }
            None => {
                log::warn!("No level left to load, ending the run as won");
                self.set_screen(Screen::Won);
            }
        }
    }
}

impl Drop for Campaign {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::platform::InputSnapshot;
    use proptest::prelude::*;

    const NAMES: [&str; 4] = [
        "Maze Level",
        "Space Invaders Level",
        "Flappy Level",
        "Obstacle Course Level",
    ];

    fn frame(input: InputSnapshot) -> Frame {
        Frame::new(SIM_DT, 0.0, input)
    }

    fn idle(campaign: &mut Campaign) {
        campaign.tick(&frame(InputSnapshot::default()));
    }

    fn click(campaign: &mut Campaign, x: f32, y: f32) {
        campaign.tick(&frame(InputSnapshot::click(x, y)));
    }

    fn escape(seed: u64) -> Campaign {
        let mut campaign = Campaign::new(seed);
        click(&mut campaign, 640.0, 450.0);
        campaign
    }

    fn force(campaign: &mut Campaign, outcome: Outcome) {
        if let Some(level) = campaign.active.as_mut() {
            level.force_outcome(outcome);
        }
        idle(campaign);
    }

    #[test]
    fn test_escape_starts_maze() {
        let campaign = escape(1);
        assert_eq!(campaign.screen(), Screen::Playing);
        assert_eq!(campaign.active_name(), Some("Maze Level"));
        assert_eq!(campaign.remaining(), 3);
    }

    #[test]
    fn test_suffer_toast_lasts_two_seconds() {
        let mut campaign = Campaign::new(2);
        click(&mut campaign, 640.0, 540.0);
        assert!(campaign.toast_visible());

        for _ in 0..60 {
            idle(&mut campaign);
        }
        assert!(campaign.toast_visible());
        assert_eq!(campaign.screen(), Screen::Title);

        for _ in 0..90 {
            idle(&mut campaign);
        }
        assert!(!campaign.toast_visible());
        assert_eq!(campaign.screen(), Screen::Title);
        assert!(campaign.active().is_none());
    }

    #[test]
    fn test_suffer_click_frame_counts_toward_toast() {
        let mut campaign = Campaign::new(2);
        let suffer = InputSnapshot::click(640.0, 540.0);
        campaign.tick(&Frame::new(1.5, 0.0, suffer));
        assert!(campaign.toast_visible());
        // 1.5 s on the click frame plus 0.5 s reaches the limit
        campaign.tick(&Frame::new(0.5, 1.5, InputSnapshot::default()));
        assert!(!campaign.toast_visible());
    }

    #[test]
    fn test_click_outside_buttons_does_nothing() {
        let mut campaign = Campaign::new(3);
        click(&mut campaign, 10.0, 10.0);
        // Bottom edge of a button is exclusive
        click(&mut campaign, 640.0, 480.0);
        assert_eq!(campaign.screen(), Screen::Title);
        assert!(!campaign.toast_visible());
    }

    #[test]
    fn test_win_goes_to_transition_with_next_level() {
        let mut campaign = escape(4);
        force(&mut campaign, Outcome::Won);
        assert_eq!(campaign.screen(), Screen::Transition);
        assert!(campaign.active().is_none());
        assert_eq!(campaign.next_level_name(), "Space Invaders Level");
        assert!(campaign.next_level_instructions().contains("SPACE to shoot"));

        // Only the Ready! button advances
        click(&mut campaign, 100.0, 100.0);
        assert_eq!(campaign.screen(), Screen::Transition);
        click(&mut campaign, 640.0, 565.0);
        assert_eq!(campaign.screen(), Screen::Playing);
        assert_eq!(campaign.active_name(), Some("Space Invaders Level"));
    }

    #[test]
    fn test_loss_ends_run_and_enter_returns_to_title() {
        let mut campaign = escape(5);
        force(&mut campaign, Outcome::Won);
        click(&mut campaign, 640.0, 565.0);
        force(&mut campaign, Outcome::Lost);
        assert_eq!(campaign.screen(), Screen::Lost);
        assert!(campaign.active().is_none());

        // Toast state from earlier is dropped on the way back
        campaign.toast.show();
        campaign.tick(&frame(InputSnapshot::enter()));
        assert_eq!(campaign.screen(), Screen::Title);
        assert!(!campaign.toast_visible());
    }

    #[test]
    fn test_winning_run_plays_levels_in_order() {
        let mut campaign = escape(6);
        let mut seen = Vec::new();
        for _ in 0..8 {
            match campaign.screen() {
                Screen::Playing => {
                    seen.extend(campaign.active_name());
                    force(&mut campaign, Outcome::Won);
                }
                Screen::Transition => click(&mut campaign, 640.0, 565.0),
                _ => break,
            }
        }
        assert_eq!(seen, NAMES);
        assert_eq!(campaign.screen(), Screen::Won);

        campaign.tick(&frame(InputSnapshot::enter()));
        assert_eq!(campaign.screen(), Screen::Title);

        // A second run starts from a fresh queue
        click(&mut campaign, 640.0, 450.0);
        assert_eq!(campaign.active_name(), Some("Maze Level"));
        assert_eq!(campaign.remaining(), 3);
    }

    #[test]
    fn test_playing_without_level_falls_back_to_lost() {
        let mut campaign = escape(7);
        campaign.active = None;
        idle(&mut campaign);
        assert_eq!(campaign.screen(), Screen::Lost);
    }

    #[test]
    fn test_transition_with_empty_queue_falls_back_to_won() {
        let mut campaign = escape(8);
        force(&mut campaign, Outcome::Won);
        campaign.queue.clear();
        click(&mut campaign, 640.0, 565.0);
        assert_eq!(campaign.screen(), Screen::Won);
    }

    #[test]
    fn test_shutdown_unloads_active_level() {
        let mut campaign = escape(9);
        campaign.shutdown();
        assert!(campaign.active().is_none());
        // Idempotent
        campaign.shutdown();
    }

    #[test]
    fn test_draw_per_screen() {
        let mut campaign = Campaign::new(10);
        let mut out = DrawList::new();
        campaign.draw(&mut out);
        assert!(out.texts().any(|t| t == "SUFFER"));

        click(&mut campaign, 640.0, 450.0);
        out.reset();
        campaign.draw(&mut out);
        assert!(out.texts().any(|t| t.starts_with("Coins: 0/")));

        force(&mut campaign, Outcome::Won);
        out.reset();
        campaign.draw(&mut out);
        assert!(out.texts().any(|t| t == "Space Invaders Level"));
        assert!(out.texts().any(|t| t == "Ready!"));
    }

    #[test]
    fn test_snapshot_round_trips() {
        let campaign = escape(11);
        let value = campaign.snapshot().expect("snapshot");
        let back: Campaign = serde_json::from_value(value).expect("decode");
        assert_eq!(back, campaign);
    }

    fn scripted_input(k: u8) -> InputSnapshot {
        InputSnapshot {
            left: k & 1 != 0,
            right: k & 2 != 0,
            up: k & 4 != 0,
            down: k & 8 != 0,
            space: k & 16 != 0,
            space_pressed: k & 16 != 0,
            ..Default::default()
        }
    }

    proptest! {
        #[test]
        fn prop_same_seed_same_run(
            seed in any::<u64>(),
            keys in proptest::collection::vec(any::<u8>(), 1..300),
        ) {
            let mut a = escape(seed);
            let mut b = escape(seed);
            let mut now = 0.0;
            for k in keys {
                now += SIM_DT as f64;
                let f = Frame::new(SIM_DT, now, scripted_input(k));
                a.tick(&f);
                b.tick(&f);
            }
            prop_assert_eq!(a.snapshot().ok(), b.snapshot().ok());
            prop_assert_eq!(&a, &b);
        }

        #[test]
        fn prop_forced_wins_visit_every_level_once(seed in any::<u64>()) {
            let mut campaign = escape(seed);
            let mut seen = Vec::new();
            while campaign.screen() != Screen::Won {
                match campaign.screen() {
                    Screen::Playing => {
                        seen.extend(campaign.active_name());
                        force(&mut campaign, Outcome::Won);
                    }
                    Screen::Transition => click(&mut campaign, 640.0, 565.0),
                    other => prop_assert!(false, "unexpected screen {:?}", other),
                }
            }
            prop_assert_eq!(seen, NAMES.to_vec());
        }
    }
}
