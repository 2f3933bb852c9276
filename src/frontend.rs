use crate::{
    attrs::{non_empty, typewriter_speed_ms, DEFAULT_TYPEWRITER_SPEED_MS},
    clipboard::{CopyFeedback, MarkupSurface, COPY_GLOBAL_NAME},
    config::FxConfig,
    geometry::{Point, Rect},
    hover::{pointer_properties, LESSON_CARD_SELECTOR},
    log::{LogLevel, Logger},
    parallax::{parallax_transform, PARALLAX_ATTR, PARALLAX_SELECTOR},
    ripple::{RippleEffect, RippleGeometry, RIPPLE_CLASS, RIPPLE_TRIGGER_SELECTOR},
    scroll_reveal::ScrollRevealOptions,
    timer::{Scheduler, TimerHandle},
    tooltip::{hide_declaration, TooltipPlacement, TOOLTIP_ATTR, TOOLTIP_CLASS, TOOLTIP_SELECTOR},
    typewriter::{
        TextSurface, Typewriter, TYPEWRITER_SELECTOR, TYPEWRITER_SPEED_ATTR, TYPEWRITER_TEXT_ATTR,
    },
};
use gloo_events::EventListener;
use js_sys::{Function, Promise, Reflect, JSON};
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    window, CssStyleDeclaration, Document, Element, Event, HtmlElement, MouseEvent, SvgElement, Window,
};

/// `setTimeout`-backed scheduler. Callbacks that never fire because they
/// were cancelled stay allocated on the JS side.
#[derive(Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Option<TimerHandle> {
        let callback = Closure::once_into_js(move || task());
        let id = window()?
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                i32::try_from(delay_ms).unwrap_or(i32::MAX),
            )
            .ok()?;

        Some(TimerHandle(i64::from(id)))
    }

    fn cancel(&self, handle: TimerHandle) {
        if let (Some(win), Ok(id)) = (window(), i32::try_from(handle.0)) {
            win.clear_timeout_with_handle(id);
        }
    }
}

impl TextSurface for Element {
    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }
}

impl MarkupSurface for Element {
    fn markup(&self) -> String {
        self.inner_html()
    }

    fn set_markup(&self, markup: &str) {
        self.set_inner_html(markup);
    }
}

/// Listeners registered by one install pass, plus what they were bound to.
#[derive(Default)]
pub struct Installed {
    listeners: Vec<EventListener>,
    cards: usize,
    buttons: usize,
    tooltips: usize,
    typewriters: usize,
}

impl Installed {
    /// Keeps every listener alive for the rest of the page.
    pub fn persist(self) {
        for listener in self.listeners {
            listener.forget();
        }
    }

    fn summary(&self) -> serde_json::Value {
        json!({
            "cards": self.cards,
            "buttons": self.buttons,
            "tooltips": self.tooltips,
            "typewriters": self.typewriters,
            "listeners": self.listeners.len(),
        })
    }
}

fn missing(what: &str) -> JsValue {
    JsValue::from_str(&format!("{what} unavailable"))
}

fn describe_js_error(error: &JsValue) -> String {
    error
        .as_string()
        .or_else(|| {
            Reflect::get(error, &JsValue::from_str("message"))
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| format!("{error:?}"))
}

fn report(logger: &Logger, component: &str, result: Result<(), JsValue>) {
    if let Err(error) = result {
        logger.event(
            LogLevel::Warn,
            "component_install_failed",
            json!({ "component": component, "error": describe_js_error(&error) }),
        );
    }
}

fn rect_of(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

fn client_point(event: &MouseEvent) -> Point {
    Point::from_client(event.client_x(), event.client_y())
}

fn query_elements(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;

    Ok((0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Inline style of HTML and SVG elements alike.
fn inline_style(element: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        return Some(html.style());
    }
    element.dyn_ref::<SvgElement>().map(|svg| svg.style())
}

fn set_style(element: &Element, name: &str, value: &str) {
    if let Some(style) = inline_style(element) {
        let _ = style.set_property(name, value);
    }
}

fn set_styles<'a>(element: &Element, declarations: impl IntoIterator<Item = (&'a str, String)>) {
    let Some(style) = inline_style(element) else {
        return;
    };
    for (name, value) in declarations {
        let _ = style.set_property(name, &value);
    }
}

fn create_html_element(document: &Document, tag: &str, class_name: &str) -> Result<HtmlElement, JsValue> {
    let element = document.create_element(tag)?.dyn_into::<HtmlElement>()?;
    element.set_class_name(class_name);
    Ok(element)
}

fn init_scroll_reveal(options: &ScrollRevealOptions) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| missing("window"))?;
    let aos = Reflect::get(&win, &JsValue::from_str("AOS"))?;
    if aos.is_undefined() || aos.is_null() {
        return Err(missing("AOS"));
    }

    let init = Reflect::get(&aos, &JsValue::from_str("init"))?;
    let Some(init) = init.dyn_ref::<Function>() else {
        return Err(missing("AOS.init"));
    };

    let encoded = options
        .to_json()
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    init.call1(&aos, &JSON::parse(&encoded)?)?;
    Ok(())
}

fn install_hover_tracker(document: &Document, installed: &mut Installed) -> Result<(), JsValue> {
    for card in query_elements(document, LESSON_CARD_SELECTOR)? {
        let target = card.clone();
        let listener = EventListener::new(&card, "mousemove", move |event: &Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            set_styles(&target, pointer_properties(rect_of(&target), client_point(event)));
        });

        installed.listeners.push(listener);
        installed.cards += 1;
    }

    Ok(())
}

fn spawn_ripple(
    document: &Document,
    control: &Element,
    effect: &RippleEffect<BrowserScheduler>,
    event: &MouseEvent,
) -> Result<(), JsValue> {
    let geometry = RippleGeometry::new(rect_of(control), client_point(event));
    let ripple = create_html_element(document, "span", RIPPLE_CLASS)?;
    set_styles(&ripple, geometry.style_declarations());
    control.append_child(&ripple)?;

    effect.expire(move || ripple.remove());
    Ok(())
}

fn install_ripples(
    document: &Document,
    config: &FxConfig,
    logger: &Logger,
    installed: &mut Installed,
) -> Result<(), JsValue> {
    let effect = RippleEffect::new(BrowserScheduler, config.ripple_lifetime_ms);

    for button in query_elements(document, RIPPLE_TRIGGER_SELECTOR)? {
        let control = button.clone();
        let effect = effect.clone();
        let document = document.clone();
        let logger = *logger;

        let listener = EventListener::new(&button, "click", move |event: &Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            if let Err(error) = spawn_ripple(&document, &control, &effect, event) {
                logger.event(
                    LogLevel::Debug,
                    "ripple_failed",
                    json!({ "error": describe_js_error(&error) }),
                );
            }
        });

        installed.listeners.push(listener);
        installed.buttons += 1;
    }

    Ok(())
}

fn install_tooltips(document: &Document, config: &FxConfig, installed: &mut Installed) -> Result<(), JsValue> {
    let body = document.body().ok_or_else(|| missing("document.body"))?;
    let gap = config.tooltip_gap_px;

    for trigger in query_elements(document, TOOLTIP_SELECTOR)? {
        let tooltip = create_html_element(document, "div", TOOLTIP_CLASS)?;
        tooltip.set_text_content(trigger.get_attribute(TOOLTIP_ATTR).as_deref());
        body.append_child(&tooltip)?;

        let on_enter = {
            let anchor = trigger.clone();
            let tooltip = tooltip.clone();
            EventListener::new(&trigger, "mouseenter", move |_| {
                let placement = TooltipPlacement::above(rect_of(&anchor), gap);
                set_styles(&tooltip, placement.show_declarations());
            })
        };

        let on_leave = EventListener::new(&trigger, "mouseleave", move |_| {
            let (name, value) = hide_declaration();
            set_style(&tooltip, name, value);
        });

        installed.listeners.push(on_enter);
        installed.listeners.push(on_leave);
        installed.tooltips += 1;
    }

    Ok(())
}

fn apply_parallax(document: &Document, win: &Window) {
    let scroll_y = win.page_y_offset().unwrap_or(0.0);
    let Ok(elements) = query_elements(document, PARALLAX_SELECTOR) else {
        return;
    };

    for element in elements {
        let transform = parallax_transform(scroll_y, element.get_attribute(PARALLAX_ATTR).as_deref());
        set_style(&element, "transform", &transform);
    }
}

/// Re-queries marked elements on every scroll event; nothing is throttled.
fn install_parallax(document: &Document, installed: &mut Installed) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| missing("window"))?;
    let document = document.clone();
    let source = win.clone();

    installed.listeners.push(EventListener::new(&win, "scroll", move |_| {
        apply_parallax(&document, &source);
    }));
    Ok(())
}

/// Starts a typewriter reveal on `element`, replacing whatever it shows.
pub fn typewrite(element: Element, text: &str, speed_ms: Option<u32>) -> Typewriter<BrowserScheduler> {
    Typewriter::start(
        BrowserScheduler,
        element,
        text,
        speed_ms.unwrap_or(DEFAULT_TYPEWRITER_SPEED_MS),
    )
}

fn start_typewriters(document: &Document, logger: &Logger, installed: &mut Installed) -> Result<(), JsValue> {
    for element in query_elements(document, TYPEWRITER_SELECTOR)? {
        let text = non_empty(element.get_attribute(TYPEWRITER_TEXT_ATTR))
            .or_else(|| element.text_content())
            .unwrap_or_default();
        let speed_ms = typewriter_speed_ms(element.get_attribute(TYPEWRITER_SPEED_ATTR).as_deref());

        logger.event(
            LogLevel::Debug,
            "typewriter_started",
            json!({ "chars": text.chars().count(), "speedMs": speed_ms }),
        );
        typewrite(element, &text, Some(speed_ms));
        installed.typewriters += 1;
    }

    Ok(())
}

async fn write_clipboard_text(text: &str) -> Result<(), JsValue> {
    let navigator = window().ok_or_else(|| missing("window"))?.navigator();
    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(missing("navigator.clipboard"));
    }

    let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))?;
    let Some(write_text) = write_text.dyn_ref::<Function>() else {
        return Err(missing("navigator.clipboard.writeText"));
    };

    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into::<Promise>()?;
    JsFuture::from(promise).await?;
    Ok(())
}

/// Copies text and flashes a confirmation on the button that asked for it.
#[derive(Clone)]
pub struct ClipboardCopier {
    feedback: CopyFeedback<BrowserScheduler>,
    logger: Logger,
}

impl ClipboardCopier {
    pub fn new(config: &FxConfig, logger: Logger) -> Self {
        Self {
            feedback: CopyFeedback::new(BrowserScheduler, config.copy_feedback_ms),
            logger,
        }
    }

    pub fn copy(&self, text: String, button: Element) {
        let copier = self.clone();

        spawn_local(async move {
            let result = write_clipboard_text(&text)
                .await
                .map_err(|error| describe_js_error(&error));
            copier.feedback.settle(result, button, &copier.logger);
        });
    }
}

/// Publishes `window.copyToClipboard(text, button)` for inline handlers.
fn expose_copy_helper(copier: ClipboardCopier) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| missing("window"))?;

    let callback = Closure::<dyn Fn(JsValue, JsValue)>::new(move |text: JsValue, button: JsValue| {
        let Ok(button) = button.dyn_into::<Element>() else {
            copier.logger.event(
                LogLevel::Warn,
                "copy_target_invalid",
                json!({ "reason": "button is not an element" }),
            );
            return;
        };
        copier.copy(text.as_string().unwrap_or_default(), button);
    });

    Reflect::set(&win, &JsValue::from_str(COPY_GLOBAL_NAME), callback.as_ref())?;
    callback.forget();
    Ok(())
}

/// Behaviour bound while the script loads: the scroll listener, typewriters
/// and the global copy entry point.
pub fn install_at_load(document: &Document, config: &FxConfig, logger: &Logger) -> Installed {
    let mut installed = Installed::default();

    report(logger, "parallax", install_parallax(document, &mut installed));
    report(logger, "typewriter", start_typewriters(document, logger, &mut installed));
    report(
        logger,
        "clipboard",
        expose_copy_helper(ClipboardCopier::new(config, *logger)),
    );

    installed
}

/// Behaviour bound once the document structure is ready.
pub fn install_on_ready(document: &Document, config: &FxConfig, logger: &Logger) -> Installed {
    let mut installed = Installed::default();

    if let Err(error) = init_scroll_reveal(&ScrollRevealOptions::default()) {
        logger.event(
            LogLevel::Warn,
            "scroll_reveal_unavailable",
            json!({ "error": describe_js_error(&error) }),
        );
    }
    report(logger, "hover", install_hover_tracker(document, &mut installed));
    report(logger, "ripple", install_ripples(document, config, logger, &mut installed));
    report(logger, "tooltip", install_tooltips(document, config, &mut installed));

    logger.event(LogLevel::Info, "fx_installed", installed.summary());
    installed
}

fn document_is_loading(document: &Document) -> bool {
    Reflect::get(document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|state| state.as_string())
        .map(|state| state == "loading")
        .unwrap_or(false)
}

fn read_config(document: &Document) -> FxConfig {
    let root = document.document_element();
    FxConfig::from_lookup(|name| root.as_ref().and_then(|root| root.get_attribute(name)))
}

pub fn run() {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    let config = read_config(&document);
    let logger = config.logger();

    install_at_load(&document, &config, &logger).persist();

    if document_is_loading(&document) {
        let ready_document = document.clone();
        EventListener::once(&document, "DOMContentLoaded", move |_| {
            install_on_ready(&ready_document, &config, &logger).persist();
        })
        .forget();
    } else {
        install_on_ready(&document, &config, &logger).persist();
    }
}
