use std::rc::Rc;
use std::time::Duration;

use crate::audio::{WebAudioFeedback, play_feedback};
use crate::banner::SuccessBanner;
use crate::strings;
use animaru_core as game;
use clap::Args;
use game::{Color, Effect, InputEvent, SlotIndex, Tile, TileId};
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use yew::prelude::*;

const DRAG_PAYLOAD_TYPE: &str = "text/plain";

/// Touch ghosts are drawn with the finger roughly at their center.
const GHOST_OFFSET: i32 = 30;

fn parse_tile_payload(payload: &str) -> Option<TileId> {
    payload.parse().ok()
}

fn parse_slot_attr(value: &str) -> Option<SlotIndex> {
    value
        .trim()
        .parse()
        .ok()
        .filter(|&index| game::is_valid_slot(index))
}

fn ghost_style(x: i32, y: i32) -> String {
    format!(
        "position: fixed; left: {}px; top: {}px; z-index: 1000; pointer-events: none;",
        x - GHOST_OFFSET,
        y - GHOST_OFFSET
    )
}

/// Finds the grid slot under a viewport position, used to resolve where a touch drag ended.
fn slot_at_point(x: i32, y: i32) -> Option<SlotIndex> {
    let element = gloo::utils::document().element_from_point(x as f32, y as f32)?;
    let cell = element.closest(".grid-cell").ok().flatten()?;
    parse_slot_attr(&cell.get_attribute("data-index")?)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum SlotMsg {
    DragOver(SlotIndex),
    DragLeave(SlotIndex),
    Drop(SlotIndex, Option<TileId>),
    Click(SlotIndex),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum PieceMsg {
    DragStart(TileId),
    DragEnd,
    TouchStart(TileId),
    TouchMove(i32, i32),
    TouchEnd(i32, i32),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Slot(SlotMsg),
    Piece(PieceMsg),
    NewGame,
    Timer(game::TimerTicket),
}

#[derive(Properties, Clone, PartialEq)]
struct SlotProps {
    index: SlotIndex,
    color: Option<Color>,
    #[prop_or_default]
    drop_zone: bool,
    callback: Callback<SlotMsg>,
}

#[function_component(SlotView)]
fn slot_component(props: &SlotProps) -> Html {
    let SlotProps {
        index,
        color,
        drop_zone,
        callback,
    } = props.clone();

    let class = classes!(
        "grid-cell",
        color.is_some().then_some("occupied"),
        drop_zone.then_some("drop-zone")
    );

    let ondragover = {
        let callback = callback.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            callback.emit(SlotMsg::DragOver(index));
        })
    };

    let ondragleave = {
        let callback = callback.clone();
        Callback::from(move |_: DragEvent| callback.emit(SlotMsg::DragLeave(index)))
    };

    let ondrop = {
        let callback = callback.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            let tile = e
                .data_transfer()
                .and_then(|transfer| transfer.get_data(DRAG_PAYLOAD_TYPE).ok())
                .and_then(|payload| parse_tile_payload(&payload));
            log::trace!("slot {} drop ({:?})", index, tile);
            callback.emit(SlotMsg::Drop(index, tile));
        })
    };

    let onclick = Callback::from(move |_: MouseEvent| callback.emit(SlotMsg::Click(index)));

    html! {
        <div {class} data-index={index.to_string()} {ondragover} {ondragleave} {ondrop}>
            if let Some(color) = color {
                <div class="puzzle-piece placed" style={format!("background-color: {color};")} {onclick}/>
            }
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct PieceProps {
    tile: Tile,
    #[prop_or_default]
    dragging: bool,
    #[prop_or_default]
    ghost: Option<(i32, i32)>,
    callback: Callback<PieceMsg>,
}

#[function_component(PieceView)]
fn piece_component(props: &PieceProps) -> Html {
    let PieceProps {
        tile,
        dragging,
        ghost,
        callback,
    } = props.clone();
    let id = tile.id;

    let class = classes!("puzzle-piece", dragging.then_some("dragging"));
    let mut style = format!("background-color: {};", tile.color);
    if let Some((x, y)) = ghost {
        style.push(' ');
        style.push_str(&ghost_style(x, y));
    }

    let ondragstart = {
        let callback = callback.clone();
        Callback::from(move |e: DragEvent| {
            if let Some(transfer) = e.data_transfer() {
                if let Err(err) = transfer.set_data(DRAG_PAYLOAD_TYPE, &id.to_string()) {
                    log::error!("failed to set drag payload: {:?}", err);
                }
            }
            callback.emit(PieceMsg::DragStart(id));
        })
    };

    let ondragend = {
        let callback = callback.clone();
        Callback::from(move |_: DragEvent| callback.emit(PieceMsg::DragEnd))
    };

    let ontouchstart = {
        let callback = callback.clone();
        Callback::from(move |_: TouchEvent| callback.emit(PieceMsg::TouchStart(id)))
    };

    let ontouchmove = {
        let callback = callback.clone();
        Callback::from(move |e: TouchEvent| {
            if let Some(touch) = e.touches().get(0) {
                callback.emit(PieceMsg::TouchMove(touch.client_x(), touch.client_y()));
            }
        })
    };

    let ontouchend = Callback::from(move |e: TouchEvent| {
        if let Some(touch) = e.changed_touches().get(0) {
            callback.emit(PieceMsg::TouchEnd(touch.client_x(), touch.client_y()));
        }
    });

    html! {
        <div
            {class}
            {style}
            draggable="true"
            data-tile-id={id.to_string()}
            {ondragstart}
            {ondragend}
            {ontouchstart}
            {ontouchmove}
            {ontouchend}
        />
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,

    /// How long a finished animal stays on screen, in milliseconds
    #[arg(long)]
    pub(crate) delay_ms: Option<u32>,
}

/// Seed drawn from `Math.random`, two 32-bit halves since an `f64` cannot carry 64 random bits.
fn random_seed() -> u64 {
    use js_sys::Math::random;
    let half = || (random() * f64::from(u32::MAX)) as u64;
    (half() << 32) | half()
}

impl GameProps {
    fn round_config(&self) -> game::RoundConfig {
        let config = game::RoundConfig::default();
        match self.delay_ms {
            Some(millis) => config.with_celebration_delay(Duration::from_millis(u64::from(millis))),
            None => config,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct TouchDrag {
    tile: TileId,
    position: Option<(i32, i32)>,
}

pub(crate) struct GameView {
    session: game::GameSession,
    feedback: Rc<WebAudioFeedback>,
    drop_zone: Option<SlotIndex>,
    touch_drag: Option<TouchDrag>,
    _audio_unlock: EventListener,
}

impl GameView {
    fn dispatch(&mut self, ctx: &Context<Self>, event: InputEvent) -> bool {
        log::debug!("input: {:?}", event);
        let effects = self.session.handle(event);
        self.apply_effects(ctx, &effects);
        true
    }

    fn apply_effects(&self, ctx: &Context<Self>, effects: &[Effect]) {
        play_feedback(&*self.feedback, effects);

        for effect in effects {
            match *effect {
                Effect::Schedule(ticket) => Self::schedule(ctx, ticket),
                Effect::RoundStarted(variant) => log::info!("new round: {}", variant.key),
                Effect::ScoreChanged(score) => log::info!("score: {}", score),
                other => log::trace!("effect: {:?}", other),
            }
        }
    }

    /// Timers are never cancelled, the session drops tickets that belong to an older round.
    fn schedule(ctx: &Context<Self>, ticket: game::TimerTicket) {
        let link = ctx.link().clone();
        let millis = u32::try_from(ticket.delay.as_millis()).unwrap_or(u32::MAX);
        log::trace!("schedule {:?} in {}ms", ticket.kind, millis);
        let _ = Timeout::new(millis, move || link.send_message(Msg::Timer(ticket))).forget();
    }

    fn update_slot(&mut self, ctx: &Context<Self>, msg: SlotMsg) -> bool {
        use SlotMsg::*;

        match msg {
            DragOver(index) => {
                let zone = self.session.slot_at(index).is_none().then_some(index);
                let changed = self.drop_zone != zone;
                self.drop_zone = zone;
                changed
            }
            DragLeave(index) if self.drop_zone == Some(index) => {
                self.drop_zone = None;
                true
            }
            DragLeave(_) => false,
            Drop(index, tile) => {
                self.drop_zone = None;
                match tile {
                    Some(tile) => self.dispatch(ctx, InputEvent::TileDroppedOnSlot(tile, index)),
                    None => true,
                }
            }
            Click(index) => self.dispatch(ctx, InputEvent::SlotClicked(index)),
        }
    }

    fn update_piece(&mut self, ctx: &Context<Self>, msg: PieceMsg) -> bool {
        use PieceMsg::*;

        match msg {
            DragStart(tile) => self.dispatch(ctx, InputEvent::TileDragStarted(tile)),
            DragEnd => {
                self.drop_zone = None;
                self.dispatch(ctx, InputEvent::TileDragCancelled)
            }
            TouchStart(tile) => {
                self.touch_drag = Some(TouchDrag {
                    tile,
                    position: None,
                });
                self.dispatch(ctx, InputEvent::TileDragStarted(tile))
            }
            TouchMove(x, y) => match self.touch_drag.as_mut() {
                Some(drag) => {
                    drag.position = Some((x, y));
                    true
                }
                None => false,
            },
            TouchEnd(x, y) => {
                let Some(drag) = self.touch_drag.take() else {
                    return false;
                };
                let event = match slot_at_point(x, y) {
                    Some(index) => InputEvent::TileDroppedOnSlot(drag.tile, index),
                    None => InputEvent::TileDragCancelled,
                };
                self.dispatch(ctx, event)
            }
        }
    }

    fn ghost_for(&self, tile: TileId) -> Option<(i32, i32)> {
        self.touch_drag
            .filter(|drag| drag.tile == tile)
            .and_then(|drag| drag.position)
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(random_seed);
        log::debug!("seed: {}", seed);

        let mut session = game::GameSession::with_seed(props.round_config(), seed);
        let effects = session.start_round();
        log::debug!("first round: {:?}", effects);

        let feedback = Rc::new(WebAudioFeedback::new());
        let audio_unlock = {
            let feedback = Rc::clone(&feedback);
            EventListener::once(&gloo::utils::document(), "click", move |_| {
                feedback.unlock()
            })
        };

        Self {
            session,
            feedback,
            drop_zone: None,
            touch_drag: None,
            _audio_unlock: audio_unlock,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Slot(msg) => self.update_slot(ctx, msg),
            Piece(msg) => self.update_piece(ctx, msg),
            NewGame => {
                self.drop_zone = None;
                self.touch_drag = None;
                self.dispatch(ctx, InputEvent::NewGameRequested)
            }
            Timer(ticket) => {
                let effects = self.session.fire(ticket);
                self.apply_effects(ctx, &effects);
                !effects.is_empty()
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let session = &self.session;
        let variant = session.variant();
        let held = session.held_tile();

        let slot_callback = ctx.link().callback(Msg::Slot);
        let piece_callback = ctx.link().callback(Msg::Piece);
        let cb_new_game = ctx.link().callback(|_: MouseEvent| Msg::NewGame);

        let grid_class = classes!(
            "puzzle-grid",
            session.banner_visible().then_some("celebrate")
        );
        let reveal = variant.filter(|_| session.reveal_visible());
        let banner = variant.filter(|_| session.banner_visible());

        html! {
            <div class="animaru">
                <header>
                    <h1>{strings::TITLE}</h1>
                    <div class="score">
                        {strings::SCORE_LABEL}{": "}
                        <span id="score">{session.score().to_string()}</span>
                    </div>
                    <button id="new-game-btn" onclick={cb_new_game}>{strings::NEW_GAME}</button>
                </header>
                <section>
                    <h2>{strings::GRID_HEADING}</h2>
                    <div id="puzzle-grid" class={grid_class}>
                        {
                            for game::iter_slots().map(|index| html! {
                                <SlotView
                                    {index}
                                    color={session.slot_at(index)}
                                    drop_zone={self.drop_zone == Some(index)}
                                    callback={slot_callback.clone()}
                                />
                            })
                        }
                        if let Some(variant) = reveal {
                            <div class="animal-overlay">{variant.icon}</div>
                        }
                    </div>
                </section>
                <section>
                    <h2>{strings::POOL_HEADING}</h2>
                    <div id="available-blocks">
                        {
                            for session.pool().iter().map(|&tile| html! {
                                <PieceView
                                    key={tile.id.to_string()}
                                    {tile}
                                    dragging={held == Some(tile.id)}
                                    ghost={self.ghost_for(tile.id)}
                                    callback={piece_callback.clone()}
                                />
                            })
                        }
                    </div>
                </section>
                if let Some(variant) = banner {
                    <SuccessBanner {variant} />
                }
            </div>
        }
    }
}
