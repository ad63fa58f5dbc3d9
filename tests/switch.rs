mod common;

mod tests {
    use blinken_matrix::{
        AnimationScheduler, BlinkenPattern, DisplayConfig, DisplaySwitch, Duration, Instant,
        IntentChannel, IntervalPolicy, MatrixChain, PowerSwitch, SchedulerState, SwitchIntent,
    };

    use crate::common::ScriptedSpi;

    const MIDPOINT_MS: u64 = 832;

    fn switch<'a>(
        spi: &ScriptedSpi,
        channel: &'a IntentChannel<4>,
    ) -> DisplaySwitch<'a, ScriptedSpi, BlinkenPattern, 4> {
        let config = DisplayConfig::default();
        let driver = MatrixChain::new(spi.clone(), &config);
        let scheduler = AnimationScheduler::new(driver, BlinkenPattern::new(1), config)
            .with_policy(IntervalPolicy::Fixed);
        DisplaySwitch::new(scheduler, channel.receiver())
    }

    #[test]
    fn test_setup_defaults_to_on_and_animates() {
        let spi = ScriptedSpi::new();
        let channel = IntentChannel::new();
        let mut switch = switch(&spi, &channel);

        switch.setup(Instant::from_millis(0)).unwrap();
        assert!(switch.is_on());
        assert_eq!(switch.scheduler().state(), SchedulerState::Running);

        let baseline = spi.write_count();
        switch.poll(Instant::from_millis(MIDPOINT_MS)).unwrap();
        assert_eq!(spi.write_count(), baseline + 8);
    }

    #[test]
    fn test_restored_off_state_stays_idle() {
        let spi = ScriptedSpi::new();
        let channel: IntentChannel<4> = IntentChannel::new();
        let config = DisplayConfig::default();
        let driver = MatrixChain::new(spi.clone(), &config);
        let scheduler = AnimationScheduler::new(driver, BlinkenPattern::new(1), config);
        let mut switch = DisplaySwitch::new_with_state(scheduler, channel.receiver(), false);

        switch.setup(Instant::from_millis(0)).unwrap();
        assert!(!switch.is_on());
        let after_setup = spi.write_count();
        assert!(switch.poll(Instant::from_millis(10_000)).is_none());
        assert_eq!(spi.write_count(), after_setup);
    }

    #[test]
    fn test_turn_off_halts_flushes_by_next_tick() {
        let spi = ScriptedSpi::new();
        let channel = IntentChannel::new();
        let mut switch = switch(&spi, &channel);
        switch.setup(Instant::from_millis(0)).unwrap();

        channel.sender().try_send(SwitchIntent::TurnOff).unwrap();
        // The queued intent is drained before the tick, so no frame goes out.
        assert!(switch.poll(Instant::from_millis(MIDPOINT_MS)).is_none());
        assert!(!switch.is_on());

        let after_off = spi.write_count();
        assert!(switch.poll(Instant::from_millis(60_000)).is_none());
        assert_eq!(spi.write_count(), after_off);
    }

    #[test]
    fn test_off_then_on_resumes_without_reconfiguration() {
        let spi = ScriptedSpi::new();
        let channel = IntentChannel::new();
        let mut switch = switch(&spi, &channel);
        switch.setup(Instant::from_millis(0)).unwrap();

        switch.turn_off(Instant::from_millis(100));
        switch.turn_on(Instant::from_millis(200));
        assert!(switch.is_on());
        assert_eq!(switch.scheduler().state(), SchedulerState::Running);

        let baseline = spi.write_count();
        switch.poll(Instant::from_millis(200 + MIDPOINT_MS)).unwrap();
        assert_eq!(spi.write_count(), baseline + 8);
    }

    #[test]
    fn test_intents_apply_in_order() {
        let spi = ScriptedSpi::new();
        let channel = IntentChannel::new();
        let mut switch = switch(&spi, &channel);
        switch.setup(Instant::from_millis(0)).unwrap();

        let sender = channel.sender();
        sender.try_send(SwitchIntent::TurnOff).unwrap();
        sender.try_send(SwitchIntent::TurnOn).unwrap();
        assert_eq!(channel.len(), 2);
        switch.poll(Instant::from_millis(10)).unwrap();
        assert!(channel.is_empty());
        assert!(switch.is_on());
        assert_eq!(switch.last_toggle(), Some(Instant::from_millis(10)));
    }

    #[test]
    fn test_last_toggle_tracks_state_changes() {
        let spi = ScriptedSpi::new();
        let channel = IntentChannel::new();
        let mut switch = switch(&spi, &channel);
        assert_eq!(switch.last_toggle(), None);

        switch.turn_off(Instant::from_millis(500));
        assert_eq!(switch.last_toggle(), Some(Instant::from_millis(500)));
        switch.turn_on(Instant::from_millis(900));
        assert_eq!(switch.last_toggle(), Some(Instant::from_millis(900)));
    }

    #[test]
    fn test_switch_stays_queryable_after_fault() {
        let spi = ScriptedSpi::new();
        let channel = IntentChannel::new();
        let mut switch = switch(&spi, &channel);
        switch.setup(Instant::from_millis(0)).unwrap();

        let mut now = Instant::from_millis(0);
        while switch.scheduler().state() == SchedulerState::Running {
            spi.fail_next(1);
            now += Duration::from_millis(MIDPOINT_MS);
            switch.poll(now);
        }
        assert_eq!(switch.scheduler().state(), SchedulerState::Faulted);
        // The switch itself still answers state queries.
        assert!(switch.is_on());

        // And a fresh turn-on recovers the scheduler.
        switch.turn_on(now);
        assert_eq!(switch.scheduler().state(), SchedulerState::Running);
    }
}
