use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    Idle,
    Playing,
    Completed,
}

impl RoundState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    ClearBanner,
    HideReveal,
    AdvanceRound,
}

/// Deferred transition requested from the host.
///
/// Tickets carry the generation of the round that issued them, a ticket that outlives its round is ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerTicket {
    pub generation: u64,
    pub kind: TimerKind,
    pub delay: Duration,
}

/// Something the presentation layer should do after a transition.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Effect {
    RoundStarted(&'static AnimalVariant),
    PlayPlaceTone,
    PlayCompletionChord,
    ScoreChanged(u32),
    ShowBanner(&'static AnimalVariant),
    HideBanner,
    ShowReveal(&'static AnimalVariant),
    HideReveal,
    Schedule(TimerTicket),
}

pub type Effects = SmallVec<[Effect; 8]>;

/// Normalized user input, independent of whether it came from a mouse drag or a touch gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    TileDragStarted(TileId),
    TileDragCancelled,
    TileDroppedOnSlot(TileId, SlotIndex),
    SlotClicked(SlotIndex),
    NewGameRequested,
}

#[derive(Clone, Debug, PartialEq)]
struct Round {
    variant: &'static AnimalVariant,
    engine: PlacementEngine,
    decoy_count: u8,
}

/// The whole game: score, current round and the transitions between rounds.
#[derive(Clone, Debug)]
pub struct GameSession<G = RandomRoundGenerator> {
    config: RoundConfig,
    catalog: Catalog,
    generator: G,
    ids: TileIdAllocator,
    state: RoundState,
    generation: u64,
    score: u32,
    round: Option<Round>,
    held_tile: Option<TileId>,
    banner_visible: bool,
    reveal_visible: bool,
}

impl GameSession<RandomRoundGenerator> {
    pub fn with_seed(config: RoundConfig, seed: u64) -> Self {
        Self::new(config, Catalog::builtin(), RandomRoundGenerator::new(seed))
    }
}

impl<G: RoundGenerator> GameSession<G> {
    pub fn new(config: RoundConfig, catalog: Catalog, generator: G) -> Self {
        Self {
            config,
            catalog,
            generator,
            ids: TileIdAllocator::new(),
            state: Default::default(),
            generation: 0,
            score: 0,
            round: None,
            held_tile: None,
            banner_visible: false,
            reveal_visible: false,
        }
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn variant(&self) -> Option<&'static AnimalVariant> {
        self.round.as_ref().map(|round| round.variant)
    }

    pub fn engine(&self) -> Option<&PlacementEngine> {
        self.round.as_ref().map(|round| &round.engine)
    }

    pub fn decoy_count(&self) -> Option<u8> {
        self.round.as_ref().map(|round| round.decoy_count)
    }

    pub fn pool(&self) -> &[Tile] {
        self.engine().map(PlacementEngine::pool).unwrap_or_default()
    }

    pub fn slot_at(&self, index: SlotIndex) -> Option<Color> {
        self.engine().and_then(|engine| engine.slot_at(index))
    }

    pub fn held_tile(&self) -> Option<TileId> {
        self.held_tile
    }

    pub fn banner_visible(&self) -> bool {
        self.banner_visible
    }

    pub fn reveal_visible(&self) -> bool {
        self.reveal_visible
    }

    /// Picks a new target, deals a fresh pool and clears the board.
    ///
    /// Bumps the generation, so every ticket issued before this call goes stale.
    pub fn start_round(&mut self) -> Effects {
        let setup = self
            .generator
            .generate(&self.catalog, &self.config, &mut self.ids);

        self.generation = self.generation.wrapping_add(1);
        self.state = RoundState::Playing;
        self.held_tile = None;
        self.round = Some(Round {
            variant: setup.variant,
            engine: PlacementEngine::new(setup.target, setup.pool),
            decoy_count: setup.decoy_count,
        });

        log::debug!(
            "round {} started: {}",
            self.generation,
            setup.variant.key
        );

        let mut effects = Effects::new();
        if core::mem::take(&mut self.banner_visible) {
            effects.push(Effect::HideBanner);
        }
        if core::mem::take(&mut self.reveal_visible) {
            effects.push(Effect::HideReveal);
        }
        effects.push(Effect::RoundStarted(setup.variant));
        effects
    }

    /// Explicit restart, accepted in any state.
    pub fn new_game(&mut self) -> Effects {
        log::debug!("new game requested in state {:?}", self.state);
        self.start_round()
    }

    pub fn begin_drag(&mut self, tile_id: TileId) -> Result<()> {
        let engine = self.active_engine()?;
        if engine.pool_tile(tile_id).is_none() {
            return Err(GameError::TileNotFound);
        }
        self.held_tile = Some(tile_id);
        Ok(())
    }

    pub fn cancel_drag(&mut self) {
        self.held_tile = None;
    }

    pub fn place(&mut self, tile_id: TileId, index: SlotIndex) -> Result<Effects> {
        self.held_tile = None;
        let outcome = self.active_engine_mut()?.place(tile_id, index)?;
        log::trace!("placed tile {} at slot {}", tile_id, index);

        let mut effects: Effects = smallvec![Effect::PlayPlaceTone];
        if outcome.is_completed() {
            effects.extend(self.complete_round());
        }
        Ok(effects)
    }

    pub fn remove(&mut self, index: SlotIndex) -> Result<Tile> {
        let Self { round, ids, state, .. } = self;
        if !state.is_playing() {
            return Err(GameError::RoundNotActive);
        }
        let round = round.as_mut().ok_or(GameError::RoundNotActive)?;
        let tile = round.engine.remove(index, ids)?;
        log::trace!("removed slot {}, restored as tile {}", index, tile.id);
        Ok(tile)
    }

    /// Runs a scheduled transition, unless the round that scheduled it is already gone.
    pub fn fire(&mut self, ticket: TimerTicket) -> Effects {
        if ticket.generation != self.generation {
            log::debug!(
                "ignoring stale {:?} from round {} (now {})",
                ticket.kind,
                ticket.generation,
                self.generation
            );
            return Effects::new();
        }

        match ticket.kind {
            TimerKind::ClearBanner if self.banner_visible => {
                self.banner_visible = false;
                smallvec![Effect::HideBanner]
            }
            TimerKind::HideReveal if self.reveal_visible => {
                self.reveal_visible = false;
                smallvec![Effect::HideReveal]
            }
            TimerKind::AdvanceRound if matches!(self.state, RoundState::Completed) => {
                self.start_round()
            }
            _ => Effects::new(),
        }
    }

    /// Dispatches one input event, swallowing rejected moves.
    pub fn handle(&mut self, event: InputEvent) -> Effects {
        use InputEvent::*;

        let result = match event {
            TileDragStarted(tile_id) => self.begin_drag(tile_id).map(|()| Effects::new()),
            TileDragCancelled => {
                self.cancel_drag();
                Ok(Effects::new())
            }
            TileDroppedOnSlot(tile_id, index) => self.place(tile_id, index),
            SlotClicked(index) => self.remove(index).map(|_| Effects::new()),
            NewGameRequested => Ok(self.new_game()),
        };

        result.unwrap_or_else(|err| {
            log::debug!("ignored {:?}: {}", event, err);
            Effects::new()
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            score: self.score,
            generation: self.generation,
            variant: self.variant().map(|variant| variant.key),
            slots: iter_slots().map(|index| self.slot_at(index)).collect(),
            pool: self.pool().to_vec(),
            held_tile: self.held_tile,
            banner_visible: self.banner_visible,
            reveal_visible: self.reveal_visible,
        }
    }

    fn complete_round(&mut self) -> Effects {
        let Some(variant) = self.variant() else {
            return Effects::new();
        };

        self.state = RoundState::Completed;
        self.score = self.score.saturating_add(self.config.score_award);
        self.banner_visible = true;
        self.reveal_visible = true;
        log::debug!(
            "round {} completed: {}, score {}",
            self.generation,
            variant.key,
            self.score
        );

        let delay = self.config.celebration_delay;
        let ticket = |kind| {
            Effect::Schedule(TimerTicket {
                generation: self.generation,
                kind,
                delay,
            })
        };
        smallvec![
            Effect::ScoreChanged(self.score),
            Effect::PlayCompletionChord,
            Effect::ShowBanner(variant),
            Effect::ShowReveal(variant),
            ticket(TimerKind::ClearBanner),
            ticket(TimerKind::HideReveal),
            ticket(TimerKind::AdvanceRound),
        ]
    }

    fn active_engine(&self) -> Result<&PlacementEngine> {
        match (&self.round, self.state) {
            (Some(round), RoundState::Playing) => Ok(&round.engine),
            _ => Err(GameError::RoundNotActive),
        }
    }

    fn active_engine_mut(&mut self) -> Result<&mut PlacementEngine> {
        match (&mut self.round, self.state) {
            (Some(round), RoundState::Playing) => Ok(&mut round.engine),
            _ => Err(GameError::RoundNotActive),
        }
    }
}

/// Serializable picture of the session, what a renderer needs to draw a frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub state: RoundState,
    pub score: u32,
    pub generation: u64,
    pub variant: Option<&'static str>,
    pub slots: Vec<Option<Color>>,
    pub pool: Vec<Tile>,
    pub held_tile: Option<TileId>,
    pub banner_visible: bool,
    pub reveal_visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(seed: u64) -> GameSession {
        let mut session = GameSession::with_seed(RoundConfig::default(), seed);
        session.start_round();
        session
    }

    fn solve(session: &mut GameSession) -> Effects {
        let target: Vec<_> = session.engine().unwrap().target().colors().collect();
        let mut last = Effects::new();
        for (index, color) in target.into_iter().enumerate() {
            let id = session
                .pool()
                .iter()
                .find(|tile| tile.color == color)
                .unwrap()
                .id;
            last = session.place(id, index as SlotIndex).unwrap();
        }
        last
    }

    fn tickets(effects: &Effects) -> Vec<TimerTicket> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Schedule(ticket) => Some(*ticket),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn new_session_is_idle_and_rejects_moves() {
        let mut session = GameSession::with_seed(RoundConfig::default(), 1);
        assert_eq!(session.state(), RoundState::Idle);
        assert_eq!(session.place(TileId::new(0), 0), Err(GameError::RoundNotActive));
        assert_eq!(session.remove(0), Err(GameError::RoundNotActive));
        assert!(session.pool().is_empty());
    }

    #[test]
    fn start_round_deals_a_fresh_board() {
        let session = session(2);
        assert_eq!(session.state(), RoundState::Playing);
        assert_eq!(session.generation(), 1);
        assert!(iter_slots().all(|index| session.slot_at(index).is_none()));
        let decoys = usize::from(session.decoy_count().unwrap());
        assert!((3..=5).contains(&decoys));
        assert_eq!(session.pool().len(), 16 + decoys);
    }

    #[test]
    fn completion_awards_score_and_schedules_follow_ups() {
        let mut session = session(3);
        let variant = session.variant().unwrap();

        let effects = solve(&mut session);

        assert_eq!(session.state(), RoundState::Completed);
        assert_eq!(session.score(), 100);
        assert!(session.banner_visible());
        assert!(session.reveal_visible());
        assert!(effects.contains(&Effect::PlayPlaceTone));
        assert!(effects.contains(&Effect::PlayCompletionChord));
        assert!(effects.contains(&Effect::ScoreChanged(100)));
        assert!(effects.contains(&Effect::ShowBanner(variant)));
        assert!(effects.contains(&Effect::ShowReveal(variant)));

        let kinds: Vec<_> = tickets(&effects).iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            [
                TimerKind::ClearBanner,
                TimerKind::HideReveal,
                TimerKind::AdvanceRound
            ]
        );
        assert!(
            tickets(&effects)
                .iter()
                .all(|t| t.delay == Duration::from_secs(5) && t.generation == 1)
        );
    }

    #[test]
    fn completed_round_rejects_moves() {
        let mut session = session(4);
        solve(&mut session);
        let leftover = session.pool().first().map(|tile| tile.id);

        assert_eq!(session.remove(0), Err(GameError::RoundNotActive));
        if let Some(id) = leftover {
            assert_eq!(session.begin_drag(id), Err(GameError::RoundNotActive));
        }
    }

    #[test]
    fn timers_clear_banner_reveal_then_advance() {
        let mut session = session(5);
        let pending = tickets(&solve(&mut session));
        let [banner, reveal, advance] = pending[..] else {
            panic!("expected three tickets");
        };

        assert_eq!(session.fire(banner).as_slice(), [Effect::HideBanner]);
        assert!(!session.banner_visible());
        assert_eq!(session.fire(reveal).as_slice(), [Effect::HideReveal]);
        assert!(!session.reveal_visible());

        let effects = session.fire(advance);
        assert!(matches!(effects.as_slice(), [Effect::RoundStarted(_)]));
        assert_eq!(session.state(), RoundState::Playing);
        assert_eq!(session.generation(), 2);
        assert_eq!(session.score(), 100);
    }

    #[test]
    fn advance_before_clear_still_hides_everything() {
        let mut session = session(6);
        let effects = solve(&mut session);
        let advance = tickets(&effects)[2];

        let effects = session.fire(advance);
        assert_eq!(effects[0], Effect::HideBanner);
        assert_eq!(effects[1], Effect::HideReveal);
        assert!(!session.banner_visible());
        assert!(!session.reveal_visible());
    }

    #[test]
    fn new_game_invalidates_pending_tickets() {
        let mut session = session(7);
        let effects = solve(&mut session);
        let pending = tickets(&effects);

        session.new_game();
        let generation = session.generation();
        let pool_before = session.pool().to_vec();

        for ticket in pending {
            assert!(session.fire(ticket).is_empty());
        }
        assert_eq!(session.generation(), generation);
        assert_eq!(session.state(), RoundState::Playing);
        assert_eq!(session.pool(), pool_before.as_slice());
    }

    #[test]
    fn score_survives_new_game() {
        let mut session = session(8);
        solve(&mut session);
        session.new_game();
        solve(&mut session);
        assert_eq!(session.score(), 200);
    }

    #[test]
    fn drag_tracking_follows_events() {
        let mut session = session(9);
        let id = session.pool()[0].id;

        session.handle(InputEvent::TileDragStarted(id));
        assert_eq!(session.held_tile(), Some(id));
        session.handle(InputEvent::TileDragCancelled);
        assert_eq!(session.held_tile(), None);

        session.handle(InputEvent::TileDragStarted(TileId::new(u32::MAX)));
        assert_eq!(session.held_tile(), None);

        session.handle(InputEvent::TileDragStarted(id));
        let effects = session.handle(InputEvent::TileDroppedOnSlot(id, 0));
        assert_eq!(session.held_tile(), None);
        assert_eq!(effects.as_slice(), [Effect::PlayPlaceTone]);
    }

    #[test]
    fn handle_swallows_rejections() {
        let mut session = session(10);
        let before = session.snapshot();

        assert!(session.handle(InputEvent::SlotClicked(3)).is_empty());
        assert!(
            session
                .handle(InputEvent::TileDroppedOnSlot(TileId::new(u32::MAX), 3))
                .is_empty()
        );
        assert!(session.handle(InputEvent::SlotClicked(99)).is_empty());
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn snapshot_serializes_colors_as_hex() {
        let mut session = session(11);
        let tile = session.pool()[0];
        session.place(tile.id, 0).unwrap();

        let json = serde_json::to_value(session.snapshot()).unwrap();

        assert_eq!(json["state"], "Playing");
        assert_eq!(json["slots"][0], alloc::format!("{}", tile.color).as_str());
        assert!(json["slots"][1].is_null());
        assert_eq!(
            json["pool"].as_array().unwrap().len(),
            session.pool().len()
        );
    }
}
