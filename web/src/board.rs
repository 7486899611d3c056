use crate::utils::*;
use chromatone_core as game;
use clap::Args;
use game::{BlockView, ColorId, InputAction, KeyBindings, RoundTag};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::{Interval, Timeout};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

/// How often the flashing block is re-evaluated during the presentation phase.
const FLASH_TICK_MS: u32 = 40;

/// Best score across page loads.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Record {
    pub highscore: u32,
}

impl StorageKey for Record {
    const KEY: &'static str = "chromatone:record:v1";
}

impl StorageKey for KeyBindings {
    const KEY: &'static str = "chromatone:keys:v1";
}

/// Loads the key table and writes it straight back, so the active bindings show up in local storage where they can be
/// edited by hand.
fn load_bindings() -> KeyBindings {
    let bindings: KeyBindings = LocalOrDefault::local_or_default();
    bindings.local_save();
    bindings
}

/// Action for a `keydown`, or `None` when the page should not react to it.
///
/// Chords with Ctrl, Meta or Alt belong to the browser, and a held key only counts once.
fn key_action(bindings: &KeyBindings, key: &str, repeat: bool, modified: bool) -> Option<InputAction> {
    if modified || repeat {
        return None;
    }
    bindings.action_for_key(key)
}

/// Drives `Msg::Tick` while a sequence is being shown.
#[derive(Default)]
struct FlashClock {
    started_at: f64,
    interval: Option<Interval>,
}

impl FlashClock {
    fn start(&mut self, tick: impl FnMut() + 'static) {
        self.started_at = now_ms();
        self.interval = Some(Interval::new(FLASH_TICK_MS, tick));
    }

    fn stop(&mut self) {
        self.interval = None;
    }

    fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    fn elapsed_ms(&self) -> u32 {
        (now_ms() - self.started_at).max(0.) as u32
    }
}

pub trait HasUpdate {
    fn has_update(self) -> bool;
}

impl<E> HasUpdate for Result<game::PhaseOutcome, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |outcome: game::PhaseOutcome| outcome.has_update())
    }
}

impl<E> HasUpdate for Result<game::InputOutcome, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |outcome: game::InputOutcome| outcome.has_update())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Input(InputAction),
    Presented(RoundTag),
    Tick,
}

fn block_classes(block: &BlockView) -> Classes {
    classes!(
        "block",
        block.color.name(),
        block.position.class_name(),
        block.lit.then_some("lit")
    )
}

fn key_hint(bindings: &KeyBindings, color: ColorId) -> String {
    bindings
        .keys_for(InputAction::Guess(color))
        .collect::<Vec<_>>()
        .join(" / ")
}

#[derive(Properties, Clone, PartialEq)]
struct BlockProps {
    block: BlockView,
    hint: AttrValue,
    callback: Callback<ColorId>,
}

#[function_component(BlockCell)]
fn block_component(props: &BlockProps) -> Html {
    let BlockProps {
        block,
        hint,
        callback,
    } = props.clone();

    let class = block_classes(&block);
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("{} clicked", block.color);
        callback.emit(block.color);
    });

    html! {
        <div {class} {onclick}><small>{hint}</small></div>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct BoardProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of colors in the first round
    #[arg(short, long)]
    length: Option<u8>,

    /// How long each block stays lit while the sequence is shown, in milliseconds
    #[arg(long)]
    flash_ms: Option<u32>,
}

impl BoardProps {
    fn game_config(&self) -> game::GameConfig {
        let classic = game::GameConfig::classic();
        let mut timing = classic.timing;
        if let Some(flash_ms) = self.flash_ms {
            timing.flash_ms = flash_ms;
        }
        game::GameConfig::new(self.length.unwrap_or(classic.initial_length), timing)
    }
}

pub(crate) struct Board {
    controller: game::RoundController,
    bindings: KeyBindings,
    lit: Option<ColorId>,
    flash_clock: FlashClock,
    _presentation_timer: Option<Timeout>,
    _keydown: EventListener,
}

impl Board {
    /// Arms the timer that ends the presentation phase of round `tag`, dropping (and so cancelling) the previous one.
    fn schedule_presentation(&mut self, ctx: &Context<Self>, tag: RoundTag) {
        let delay = self
            .controller
            .config()
            .timing
            .delay_ms(self.controller.current_match().all().len());
        let link = ctx.link().clone();
        let tick_link = ctx.link().clone();

        self.lit = None;
        self.flash_clock
            .start(move || tick_link.send_message(Msg::Tick));
        self._presentation_timer = Some(Timeout::new(delay, move || {
            link.send_message(Msg::Presented(tag))
        }));
        log::debug!("round {} presenting for {}ms", tag.0, delay);
    }

    fn create_keydown_listener(ctx: &Context<Self>, bindings: KeyBindings) -> EventListener {
        let link = ctx.link().clone();
        let options = EventListenerOptions::enable_prevent_default();
        EventListener::new_with_options(
            &gloo::utils::document(),
            "keydown",
            options,
            move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let modified = event.ctrl_key() || event.meta_key() || event.alt_key();
                let Some(action) = key_action(&bindings, &event.key(), event.repeat(), modified)
                else {
                    log::trace!("ignoring key {:?}", event.key());
                    return;
                };
                event.prevent_default();
                link.send_message(Msg::Input(action));
            },
        )
    }

    fn current_lit(&self) -> Option<ColorId> {
        if !self.controller.game().presentation || !self.flash_clock.is_running() {
            return None;
        }
        self.controller
            .config()
            .timing
            .lit_at(self.controller.current_match().all(), self.flash_clock.elapsed_ms())
    }

    fn save_record(&self) {
        Record {
            highscore: self.controller.game().highscore,
        }
        .local_save();
    }
}

impl Component for Board {
    type Message = Msg;
    type Properties = BoardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        let record: Record = LocalOrDefault::local_or_default();
        let bindings = load_bindings();
        let controller = game::RoundController::new(
            props.game_config(),
            game::RandomSequenceGenerator::new(seed),
        )
        .with_highscore(record.highscore);

        let mut board = Self {
            controller,
            _keydown: Board::create_keydown_listener(ctx, bindings.clone()),
            bindings,
            lit: None,
            flash_clock: FlashClock::default(),
            _presentation_timer: None,
        };
        let tag = board.controller.start_match();
        board.schedule_presentation(ctx, tag);
        board
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Input(action) => {
                let highscore = self.controller.game().highscore;
                let result = self.controller.dispatch(action);
                match &result {
                    Ok(outcome) => {
                        log::debug!("{:?}: {:?}", action, outcome);
                        if let Some(tag) = outcome.started_round() {
                            self.schedule_presentation(ctx, tag);
                        }
                    }
                    Err(err) => log::trace!("{:?} ignored: {}", action, err),
                }
                if self.controller.game().highscore != highscore {
                    self.save_record();
                }
                result.has_update()
            }
            Presented(tag) => {
                let updated = self.controller.make_presentation(tag).has_update();
                if updated {
                    self._presentation_timer = None;
                    self.flash_clock.stop();
                    self.lit = None;
                }
                updated
            }
            Tick => {
                let lit = self.current_lit();
                if self.lit != lit {
                    self.lit = lit;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let view = game::render(&self.controller, self.lit);

        let cb_guess = ctx
            .link()
            .callback(|color: ColorId| Msg::Input(InputAction::Guess(color)));
        let cb_restart = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::Input(InputAction::Restart)
        });
        let pointer_events = if view.interactive {
            "pointer-events: initial"
        } else {
            "pointer-events: none"
        };

        html! {
            <div class="chromatone">
                <aside class="scores">
                    {format!("score: {}", view.score)}<br/>
                    {format!("high score: {}", view.highscore)}<br/>
                </aside>
                if let Some(overlay) = view.game_over_overlay {
                    <Modal>
                        <div class="game-over">
                            <h3>{overlay.title}</h3>
                            <button onclick={cb_restart}>{overlay.restart_label}</button>
                        </div>
                    </Modal>
                }
                <div class={classes!("play-area", view.grayscale.then_some("grayscale"))}>
                    <span style={pointer_events}>
                        {
                            for view.rows.iter().map(|row| html! {
                                <div class="row">
                                    {
                                        for row.iter().map(|&block| {
                                            let hint = AttrValue::from(key_hint(&self.bindings, block.color));
                                            let callback = cb_guess.clone();
                                            html! {
                                                <BlockCell {block} {hint} {callback}/>
                                            }
                                        })
                                    }
                                </div>
                            })
                        }
                    </span>
                </div>
            </div>
        }
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn record_survives_local_storage() {
        Record { highscore: 12 }.local_save();
        let loaded: Record = LocalOrDefault::local_or_default();
        assert_eq!(loaded.highscore, 12);
    }

    #[wasm_bindgen_test]
    fn bindings_are_written_back_on_load() {
        use gloo::storage::{LocalStorage, Storage};

        LocalStorage::delete(<KeyBindings as StorageKey>::KEY);
        let bindings = load_bindings();

        let stored: KeyBindings = LocalStorage::get(<KeyBindings as StorageKey>::KEY).unwrap();
        assert_eq!(stored, bindings);
        assert_eq!(stored, KeyBindings::default());
    }

    #[wasm_bindgen_test]
    fn flash_clock_only_ticks_while_started() {
        let mut clock = FlashClock::default();
        assert!(!clock.is_running());

        clock.start(|| {});
        assert!(clock.is_running());

        clock.stop();
        assert!(!clock.is_running());
    }
}
