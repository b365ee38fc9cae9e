// Frame scheduling shared by the binary and tests

use crate::config::MapConfig;
use crate::game::MapState;
use crate::input::InputSignals;
use crate::network::{apply_datagram, IngestOutcome, UdpListener};
use crate::render::{DrawSurface, ViewComposer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

/// Owns the map state and drives one frame per tick:
/// input, then pending datagrams, then render.
pub struct Scheduler {
    state: MapState,
    composer: ViewComposer,
    listener: Option<UdpListener>,
    run_state: RunState,
    object_ttl_secs: Option<f64>,
}

impl Scheduler {
    pub fn new(config: &MapConfig, listener: Option<UdpListener>) -> Self {
        if let Some(ttl) = config.object_ttl_secs {
            log::info!("Objects expire after {:.1}s without updates", ttl);
        }
        Self {
            state: MapState::new(config),
            composer: ViewComposer::new(config),
            listener,
            run_state: RunState::Running,
            object_ttl_secs: config.object_ttl_secs.map(f64::from),
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn state(&self) -> &MapState {
        &self.state
    }

    pub fn composer(&self) -> &ViewComposer {
        &self.composer
    }

    /// Apply a datagram outside the listener path
    pub fn ingest(&mut self, data: &[u8], now: f64) -> IngestOutcome {
        apply_datagram(&mut self.state, data, now)
    }

    /// Run one frame. Once stopped, further ticks do nothing.
    pub fn tick<S: DrawSurface + ?Sized>(&mut self, input: InputSignals, surface: &mut S, now: f64) -> RunState {
        if self.run_state == RunState::Stopped {
            return RunState::Stopped;
        }

        if input.quit {
            log::info!("Quit requested");
            self.stop();
            return RunState::Stopped;
        }

        if input.zoom_delta != 0.0 {
            self.composer.on_zoom_input(&mut self.state.view, input.zoom_delta);
            log::debug!("Zoom factor: {:.2}", self.state.view.zoom_factor);
        }

        if let Some(listener) = &mut self.listener {
            listener.poll(&mut self.state, now);
        }

        if let Some(ttl) = self.object_ttl_secs {
            let evicted = self.state.objects.evict_stale(now, ttl);
            if evicted > 0 {
                log::debug!("Evicted {} stale objects", evicted);
            }
        }

        self.composer.render(&mut self.state, surface);
        RunState::Running
    }

    /// Stop ticking and close the listener. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.run_state == RunState::Stopped {
            return;
        }
        self.run_state = RunState::Stopped;
        if let Some(listener) = &mut self.listener {
            listener.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::testing::RecordingSurface;
    use crate::render::ImageKey;
    use macroquad::math::Vec2;
    use std::net::UdpSocket;
    use std::time::{Duration, Instant};

    fn idle() -> InputSignals {
        InputSignals::default()
    }

    #[test]
    fn test_follow_player_scenario() {
        let config = MapConfig::default();
        let mut scheduler = Scheduler::new(&config, None);

        scheduler.ingest(br#"{"type":0,"id":1,"x":0,"y":0,"rotZ":0,"inCave":false}"#, 0.0);
        let mut surface = RecordingSurface::default();
        assert_eq!(scheduler.tick(idle(), &mut surface, 0.0), RunState::Running);

        assert_eq!(scheduler.state().view.point_of_view, (0.0, 0.0));
        assert!(!scheduler.state().view.in_caves);
        assert_eq!(surface.images()[0].0, ImageKey::Overworld);
        let circles = surface.circles();
        assert_eq!(circles.len(), 1);
        // project(0, 0) is the point of view, so it lands on the window center
        let (mx, my) = config.projection().world_to_map(0.0, 0.0);
        let viewport = scheduler.composer().viewport(&scheduler.state().view);
        assert_eq!(circles[0].0, viewport.map_to_screen(mx, my).round());
        assert_eq!(circles[0].0, Vec2::splat(500.0));

        scheduler.ingest(br#"{"type":1,"id":2,"x":5,"y":5,"rotZ":0}"#, 0.1);
        scheduler.ingest(br#"{"type":0,"id":1,"x":10,"y":0,"rotZ":0,"inCave":true}"#, 0.2);
        let mut surface = RecordingSurface::default();
        scheduler.tick(idle(), &mut surface, 0.2);

        assert!(!scheduler.state().objects.contains(2));
        assert!(scheduler.state().view.in_caves);
        assert_eq!(scheduler.state().view.point_of_view, (10.0, 0.0));
        assert_eq!(surface.images()[0].0, ImageKey::Caves);
        assert_eq!(surface.circles().len(), 1);
    }

    #[test]
    fn test_view_follows_newest_player_id() {
        let mut scheduler = Scheduler::new(&MapConfig::default(), None);
        scheduler.ingest(br#"{"type":0,"id":1,"x":100,"y":100,"rotZ":0,"inCave":true}"#, 0.0);
        scheduler.ingest(br#"{"type":0,"id":2,"x":-50,"y":-50,"rotZ":0,"inCave":false}"#, 0.1);
        scheduler.ingest(br#"{"type":1,"id":3,"x":-40,"y":-40,"rotZ":0}"#, 0.1);

        for frame in 0..20 {
            let now = 0.2 + frame as f64 * 0.1;
            scheduler.tick(idle(), &mut RecordingSurface::default(), now);
            assert_eq!(scheduler.state().view.point_of_view, (-50.0, -50.0));
            assert!(!scheduler.state().view.in_caves);

            // A live update from the current player must not look like an area change
            let outcome = scheduler.ingest(br#"{"type":0,"id":2,"x":-50,"y":-50,"rotZ":0,"inCave":false}"#, now);
            assert!(matches!(outcome, IngestOutcome::Upserted { enemies_evicted: 0, .. }));
            assert!(scheduler.state().objects.contains(3));
        }
    }

    #[test]
    fn test_zoom_input_applied_before_render() {
        let mut scheduler = Scheduler::new(&MapConfig::default(), None);
        let mut surface = RecordingSurface::default();
        let input = InputSignals { quit: false, zoom_delta: 5.0 };
        scheduler.tick(input, &mut surface, 0.0);

        assert!((scheduler.state().view.zoom_factor - 2.0).abs() < 1e-5);
        assert!((surface.images()[0].2.x - 4096.0 / 2.0).abs() < 1e-2);
    }

    #[test]
    fn test_quit_stops_without_rendering() {
        let mut scheduler = Scheduler::new(&MapConfig::default(), None);
        let mut surface = RecordingSurface::default();
        let quit = InputSignals { quit: true, zoom_delta: 0.0 };

        assert_eq!(scheduler.tick(quit, &mut surface, 0.0), RunState::Stopped);
        assert_eq!(scheduler.tick(quit, &mut surface, 0.1), RunState::Stopped);
        assert_eq!(scheduler.tick(idle(), &mut surface, 0.2), RunState::Stopped);
        scheduler.stop();
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_stop_closes_listener() {
        let listener = UdpListener::bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let mut scheduler = Scheduler::new(&MapConfig::default(), Some(listener));

        let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
        sender.send_to(br#"{"type":2,"id":7,"x":0,"y":0}"#, addr).unwrap();

        let deadline = Instant::now() + Duration::from_secs(1);
        while !scheduler.state().objects.contains(7) && Instant::now() < deadline {
            scheduler.tick(idle(), &mut RecordingSurface::default(), 0.0);
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(scheduler.state().objects.contains(7));

        scheduler.stop();
        scheduler.stop();
        assert!(scheduler.listener.as_ref().is_some_and(|l| !l.is_open()));
    }

    #[test]
    fn test_ttl_eviction_when_enabled() {
        let config = MapConfig {
            object_ttl_secs: Some(2.0),
            ..MapConfig::default()
        };
        let mut scheduler = Scheduler::new(&config, None);
        scheduler.ingest(br#"{"type":1,"id":2,"x":5,"y":5,"rotZ":0}"#, 0.0);
        scheduler.ingest(br#"{"type":2,"id":3,"x":5,"y":5}"#, 1.5);

        scheduler.tick(idle(), &mut RecordingSurface::default(), 3.0);
        assert!(!scheduler.state().objects.contains(2));
        assert!(scheduler.state().objects.contains(3));
    }

    #[test]
    fn test_no_ttl_by_default() {
        let mut scheduler = Scheduler::new(&MapConfig::default(), None);
        scheduler.ingest(br#"{"type":1,"id":2,"x":5,"y":5,"rotZ":0}"#, 0.0);
        scheduler.tick(idle(), &mut RecordingSurface::default(), 10_000.0);
        assert!(scheduler.state().objects.contains(2));
    }
}
