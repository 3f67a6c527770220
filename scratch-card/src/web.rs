use crate::catalog::build_catalog;
use crate::certificate::{
    download_certificate, share_certificate, Celebration, Certificate, CertificateRenderer,
    Downloader, ShareRequest, ShareTarget,
};
use crate::session::{Progress, Session};
use crate::storage::KeyValueStore;
use crate::surface::{paint_overlay, DrawingSurface, ScratchPad};
use crate::types::{Prize, SelectOutcome};
use anyhow::anyhow;
use js_sys::{Array, Function, Object, Promise, Reflect};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    CanvasRenderingContext2d, Document, Element, Event, EventTarget, File, HtmlAnchorElement,
    HtmlCanvasElement, HtmlElement, HtmlImageElement, MouseEvent, Navigator, Storage, Window,
};

// Browser adapter. Looks up the page's cards and controls, turns DOM events into session
// calls and plays the resulting effects back onto the page.

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = html2canvas)]
    fn html2canvas(node: &HtmlElement, options: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_name = confetti)]
    fn confetti(options: &JsValue) -> Result<(), JsValue>;
}

fn js_err(value: JsValue) -> anyhow::Error {
    anyhow!("{:?}", value)
}

// JSON values go over as plain objects, not `Map`s.
fn to_object(value: &serde_json::Value) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize: {e}")))
}

#[derive(Default)]
struct ConsoleWriter {
    buf: Vec<u8>,
}

impl std::io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.buf.is_empty() {
            let line = String::from_utf8_lossy(&self.buf);
            web_sys::console::log_1(&JsValue::from_str(line.trim_end()));
            self.buf.clear();
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

fn init_logging() {
    // No clock on wasm32-unknown-unknown, so timestamps stay off.
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleWriter::default)
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    fn new(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                warn!("local storage unavailable: {:?}", e);
                None
            }
        };
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        match &self.storage {
            Some(storage) => storage.get_item(key).map_err(js_err),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| anyhow!("local storage unavailable"))?;
        storage.set_item(key, value).map_err(js_err)
    }
}

struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        Ok(Self { canvas, ctx })
    }

    fn fit_to(&self, card: &HtmlElement) {
        let width = card.client_width().max(0) as u32;
        let height = card.client_height().max(0) as u32;
        if width > 0 && height > 0 {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
    }
}

impl DrawingSurface for CanvasSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    #[allow(deprecated)]
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        let _ = self.ctx.set_global_composite_operation("source-over");
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.fill_rect(x, y, width, height);
    }

    fn fill_glyph(&mut self, glyph: &str, x: f64, y: f64, size: f64, angle: f64) {
        self.ctx.save();
        self.ctx.set_font(&format!("{}px sans-serif", size));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        let drawn = self
            .ctx
            .translate(x, y)
            .and_then(|_| self.ctx.rotate(angle))
            .and_then(|_| self.ctx.fill_text(glyph, 0.0, 0.0));
        if let Err(e) = drawn {
            debug!("glyph draw failed: {:?}", e);
        }
        self.ctx.restore();
    }

    fn erase_circle(&mut self, x: f64, y: f64, radius: f64) {
        let _ = self.ctx.set_global_composite_operation("destination-out");
        self.ctx.begin_path();
        if self
            .ctx
            .arc(x, y, radius, 0.0, std::f64::consts::PI * 2.0)
            .is_ok()
        {
            self.ctx.fill();
        }
        let _ = self.ctx.set_global_composite_operation("source-over");
    }

    fn alpha_channel(&self) -> Vec<u8> {
        let (width, height) = (self.canvas.width() as f64, self.canvas.height() as f64);
        match self.ctx.get_image_data(0.0, 0.0, width, height) {
            Ok(image) => image.data().0.iter().skip(3).step_by(4).copied().collect(),
            Err(e) => {
                debug!("could not sample canvas: {:?}", e);
                vec![]
            }
        }
    }

    fn set_hidden(&mut self, hidden: bool) {
        let opacity = if hidden { "0" } else { "1" };
        let _ = self.canvas.style().set_property("opacity", opacity);
    }
}

struct ConfettiBurst;

impl Celebration for ConfettiBurst {
    fn celebrate(&self) {
        let options = serde_json::json!({
            "particleCount": 150,
            "spread": 100,
            "origin": { "y": 0.6 },
            "zIndex": 1001,
        });
        let fired = to_object(&options).and_then(|options| confetti(&options));
        if let Err(e) = fired {
            debug!("confetti unavailable: {:?}", e);
        }
    }
}

struct CertificateNode {
    document: Document,
    node: HtmlElement,
}

impl CertificateNode {
    fn populate(&self, certificate: &Certificate) -> Result<(), JsValue> {
        let container = self
            .node
            .query_selector(".won-gifts-container")?
            .ok_or_else(|| JsValue::from_str("missing .won-gifts-container"))?;
        container.set_inner_html("");
        for gift in certificate.gifts.iter() {
            let item = self.document.create_element("div")?;
            item.class_list().add_1("won-gift")?;
            let image = self.document.create_element("img")?;
            image.set_attribute("src", &gift.image)?;
            image.set_attribute("alt", &gift.name)?;
            let label = self.document.create_element("p")?;
            label.set_text_content(Some(&gift.name));
            item.append_child(&image)?;
            item.append_child(&label)?;
            container.append_child(&item)?;
        }
        Ok(())
    }
}

impl CertificateRenderer for CertificateNode {
    type Image = HtmlCanvasElement;

    async fn render(&self, certificate: &Certificate) -> anyhow::Result<HtmlCanvasElement> {
        self.populate(certificate).map_err(js_err)?;
        let options = to_object(&serde_json::json!({ "backgroundColor": null, "useCORS": true }))
            .map_err(js_err)?;
        let promise = html2canvas(&self.node, &options).map_err(js_err)?;
        let canvas = JsFuture::from(promise).await.map_err(js_err)?;
        canvas.dyn_into::<HtmlCanvasElement>().map_err(js_err)
    }
}

struct AnchorDownload {
    document: Document,
}

impl Downloader<HtmlCanvasElement> for AnchorDownload {
    fn download(&self, image: HtmlCanvasElement, filename: &str) -> anyhow::Result<()> {
        let url = image.to_data_url_with_type("image/png").map_err(js_err)?;
        let link = self
            .document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|e| js_err(e.into()))?;
        link.set_download(filename);
        link.set_href(&url);
        link.click();
        Ok(())
    }
}

struct NavigatorShare {
    navigator: Navigator,
}

impl NavigatorShare {
    fn share_fn(&self) -> Option<Function> {
        Reflect::get(&self.navigator, &JsValue::from_str("share"))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }
}

async fn canvas_blob(canvas: &HtmlCanvasElement) -> anyhow::Result<JsValue> {
    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let callback = Closure::once_into_js(move |blob: JsValue| {
            let _ = resolve.call1(&JsValue::NULL, &blob);
        });
        if let Err(e) = canvas.to_blob(callback.unchecked_ref()) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });
    JsFuture::from(promise).await.map_err(js_err)
}

impl ShareTarget<HtmlCanvasElement> for NavigatorShare {
    fn can_share(&self) -> bool {
        self.share_fn().is_some()
    }

    async fn share(&self, image: HtmlCanvasElement, request: &ShareRequest) -> anyhow::Result<()> {
        let share = self
            .share_fn()
            .ok_or_else(|| anyhow!("navigator.share unavailable"))?;
        let blob = canvas_blob(&image).await?;
        let file_options = Object::new();
        Reflect::set(&file_options, &"type".into(), &"image/png".into()).map_err(js_err)?;
        let file = File::new_with_blob_sequence_and_options(
            &Array::of1(&blob),
            &request.filename,
            file_options.unchecked_ref(),
        )
        .map_err(js_err)?;

        let data = Object::new();
        Reflect::set(&data, &"title".into(), &JsValue::from_str(&request.title)).map_err(js_err)?;
        Reflect::set(&data, &"text".into(), &JsValue::from_str(&request.text)).map_err(js_err)?;
        Reflect::set(&data, &"files".into(), &Array::of1(&file)).map_err(js_err)?;
        let pending = share.call1(&self.navigator, &data).map_err(js_err)?;
        JsFuture::from(Promise::from(pending)).await.map_err(js_err)?;
        Ok(())
    }
}

struct Page {
    window: Window,
    document: Document,
    body: HtmlElement,
    title: HtmlElement,
    confirmation_modal: HtmlElement,
    modal_text: Element,
    yes_button: HtmlElement,
    no_button: HtmlElement,
    game_over_modal: HtmlElement,
    close_game_over: HtmlElement,
    reveal_all_button: HtmlElement,
    download_button: HtmlElement,
    share_button: HtmlElement,
    certificate: HtmlElement,
}

fn by_id(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)
}

impl Page {
    fn find(window: Window) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?;
        let confirmation_modal = by_id(&document, "confirmation-modal")?;
        let modal_text = confirmation_modal
            .query_selector("#modal-text")?
            .ok_or_else(|| JsValue::from_str("missing #modal-text"))?;
        Ok(Self {
            title: by_id(&document, "main-title")?,
            yes_button: by_id(&document, "modal-btn-yes")?,
            no_button: by_id(&document, "modal-btn-no")?,
            game_over_modal: by_id(&document, "game-over-modal")?,
            close_game_over: by_id(&document, "close-game-over-btn")?,
            reveal_all_button: by_id(&document, "reveal-all-btn")?,
            download_button: by_id(&document, "download-btn")?,
            share_button: by_id(&document, "share-btn")?,
            certificate: by_id(&document, "winnings-certificate")?,
            confirmation_modal,
            modal_text,
            body,
            document,
            window,
        })
    }

    fn set_title(&self, text: &str) {
        self.title.set_text_content(Some(text));
    }

    fn navigator_share(&self) -> NavigatorShare {
        NavigatorShare {
            navigator: self.window.navigator(),
        }
    }

    fn certificate_node(&self) -> CertificateNode {
        CertificateNode {
            document: self.document.clone(),
            node: self.certificate.clone(),
        }
    }
}

fn add_class(element: &Element, class: &str) {
    let _ = element.class_list().add_1(class);
}

fn remove_class(element: &Element, class: &str) {
    let _ = element.class_list().remove_1(class);
}

fn hide(element: &HtmlElement) {
    let _ = element.style().set_property("display", "none");
}

struct Card {
    root: HtmlElement,
    surface: CanvasSurface,
    pad: ScratchPad,
}

impl Card {
    fn find(root: HtmlElement) -> Result<Self, JsValue> {
        let canvas = root
            .query_selector(".scratch-surface")?
            .ok_or_else(|| JsValue::from_str("card without .scratch-surface"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(JsValue::from)?;
        Ok(Self {
            surface: CanvasSurface::new(canvas)?,
            root,
            pad: ScratchPad::default(),
        })
    }

    fn show_prize(&self, prize: &Prize) {
        let root = &self.root;
        let _ = root.set_attribute("data-gift-id", &prize.id);
        let _ = root.set_attribute("data-gift-name", &prize.name);
        if let Ok(Some(content)) = root.query_selector(".prize-content") {
            remove_class(&content, "is-hidden");
            if let Ok(Some(image)) = content.query_selector("img") {
                if let Ok(image) = image.dyn_into::<HtmlImageElement>() {
                    image.set_src(&prize.image);
                }
            }
            if let Ok(Some(label)) = content.query_selector("p") {
                label.set_text_content(Some(&prize.name));
            }
        }
    }

    fn mark_revealed(&mut self) {
        add_class(&self.root, "fully-scratched");
        self.surface.set_hidden(true);
    }
}

struct App {
    page: Page,
    cards: Vec<Card>,
    session: Session<LocalStore>,
}

type Shared = Rc<RefCell<App>>;

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn schedule(window: &Window, delay_ms: u32, f: impl FnOnce() + 'static) {
    let callback = Closure::once_into_js(f);
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        delay_ms as i32,
    ) {
        warn!("could not schedule timer: {:?}", e);
    }
}

fn pointer_position(event: &Event) -> Option<(f64, f64)> {
    event
        .dyn_ref::<MouseEvent>()
        .map(|e| (e.offset_x() as f64, e.offset_y() as f64))
}

impl App {
    fn paint_all(&mut self) {
        let slots = &self.session.state().slots;
        for (card, slot) in self.cards.iter_mut().zip(slots.iter()) {
            card.show_prize(&slot.prize);
            if slot.fully_revealed {
                card.mark_revealed();
            } else {
                card.surface.fit_to(&card.root);
                paint_overlay(&mut card.surface);
            }
        }
    }

    fn on_card_click(&mut self, slot: usize) {
        if let SelectOutcome::Prompt(prompt) = self.session.select(slot) {
            self.page.modal_text.set_text_content(Some(&prompt.message));
            add_class(&self.page.confirmation_modal, "visible");
        }
    }

    fn on_cancel(&mut self) {
        remove_class(&self.page.confirmation_modal, "visible");
        self.session.cancel();
    }

    fn on_confirm(&mut self) {
        remove_class(&self.page.confirmation_modal, "visible");
        let confirmation = match self.session.confirm() {
            Ok(confirmation) => confirmation,
            Err(e) => {
                debug!("confirm ignored: {e}");
                return;
            }
        };
        let slots = &self.session.state().slots;
        let mut touched = vec![confirmation.slot];
        touched.extend(confirmation.swapped_with);
        for index in touched {
            if let (Some(card), Some(slot)) = (self.cards.get_mut(index), slots.get(index)) {
                card.show_prize(&slot.prize);
                paint_overlay(&mut card.surface);
            }
        }
        if let Some(card) = self.cards.get_mut(confirmation.slot) {
            add_class(&card.root, "is-scratched");
            card.pad.enable();
        }
        if confirmation.remaining > 0 {
            self.page.set_title(&self.session.state().status_text());
        }
    }

    /// Returns the end-of-game delay when this stroke completed the game.
    fn on_scratch(&mut self, slot: usize, fraction: Option<f64>) -> Option<u32> {
        let fraction = fraction?;
        match self.session.scratch_progress(slot, fraction) {
            Progress::Unchanged => None,
            Progress::Revealed => {
                if let Some(card) = self.cards.get_mut(slot) {
                    card.mark_revealed();
                }
                None
            }
            Progress::Completed { delay_ms } => {
                if let Some(card) = self.cards.get_mut(slot) {
                    card.mark_revealed();
                }
                add_class(&self.page.body, "selection-done");
                self.page.set_title(&self.session.state().status_text());
                Some(delay_ms)
            }
        }
    }

    fn on_release(&mut self, slot: usize, left: bool) {
        if let Some(card) = self.cards.get_mut(slot) {
            let ended = if left { card.pad.pointer_leave() } else { card.pad.pointer_up() };
            if ended {
                self.session.release(slot);
            }
        }
    }

    fn on_reveal_all(&mut self) {
        for index in self.session.reveal_all() {
            if let Some(card) = self.cards.get_mut(index) {
                card.mark_revealed();
            }
        }
        hide(&self.page.reveal_all_button);
    }

    fn announce(&mut self) {
        let Some(certificate) = self.session.announce(&ConfettiBurst) else {
            return;
        };
        if let Err(e) = self.page.certificate_node().populate(&certificate) {
            error!("could not fill certificate: {:?}", e);
        }
        add_class(&self.page.game_over_modal, "visible");
        if self.session.is_restored() {
            hide(&self.page.reveal_all_button);
        }
        if !self.page.navigator_share().can_share() {
            hide(&self.page.share_button);
        }
    }
}

fn handle_scratch(app: &Shared, slot: usize, fraction: Option<f64>) {
    let completed = app.borrow_mut().on_scratch(slot, fraction);
    if let Some(delay_ms) = completed {
        let window = app.borrow().page.window.clone();
        let app = app.clone();
        schedule(&window, delay_ms, move || app.borrow_mut().announce());
    }
}

fn wire_card(app: &Shared, slot: usize) -> Result<(), JsValue> {
    let (root, canvas) = {
        let state = app.borrow();
        let card = &state.cards[slot];
        (card.root.clone(), card.surface.canvas.clone())
    };

    let shared = app.clone();
    listen(&root, "click", move |_| shared.borrow_mut().on_card_click(slot))?;

    let shared = app.clone();
    listen(&canvas, "mousedown", move |event| {
        let Some((x, y)) = pointer_position(&event) else {
            return;
        };
        let fraction = {
            let mut state = shared.borrow_mut();
            let card = &mut state.cards[slot];
            card.pad.pointer_down(&mut card.surface, x, y)
        };
        handle_scratch(&shared, slot, fraction);
    })?;

    let shared = app.clone();
    listen(&canvas, "mousemove", move |event| {
        let Some((x, y)) = pointer_position(&event) else {
            return;
        };
        let fraction = {
            let mut state = shared.borrow_mut();
            let card = &mut state.cards[slot];
            card.pad.pointer_move(&mut card.surface, x, y)
        };
        handle_scratch(&shared, slot, fraction);
    })?;

    let shared = app.clone();
    listen(&canvas, "mouseup", move |_| shared.borrow_mut().on_release(slot, false))?;
    let shared = app.clone();
    listen(&canvas, "mouseleave", move |_| shared.borrow_mut().on_release(slot, true))?;
    Ok(())
}

fn wire_controls(app: &Shared) -> Result<(), JsValue> {
    let page = {
        let state = app.borrow();
        let page = &state.page;
        (
            page.yes_button.clone(),
            page.no_button.clone(),
            page.close_game_over.clone(),
            page.game_over_modal.clone(),
            page.reveal_all_button.clone(),
            page.download_button.clone(),
            page.share_button.clone(),
        )
    };
    let (yes, no, close, game_over, reveal_all, download, share) = page;

    let shared = app.clone();
    listen(&yes, "click", move |_| shared.borrow_mut().on_confirm())?;
    let shared = app.clone();
    listen(&no, "click", move |_| shared.borrow_mut().on_cancel())?;

    let modal = game_over.clone();
    listen(&close, "click", move |_| remove_class(&modal, "visible"))?;
    let modal = game_over.clone();
    listen(&game_over, "click", move |event| {
        let backdrop: &JsValue = modal.as_ref();
        if event.target().map(JsValue::from).as_ref() == Some(backdrop) {
            remove_class(&modal, "visible");
        }
    })?;

    let shared = app.clone();
    listen(&reveal_all, "click", move |_| shared.borrow_mut().on_reveal_all())?;

    let shared = app.clone();
    listen(&download, "click", move |_| {
        let (renderer, downloader, certificate) = {
            let state = shared.borrow();
            let downloader = AnchorDownload {
                document: state.page.document.clone(),
            };
            (state.page.certificate_node(), downloader, state.session.certificate())
        };
        let Some(certificate) = certificate else {
            return;
        };
        spawn_local(async move {
            download_certificate(&renderer, &downloader, &certificate).await;
        });
    })?;

    let shared = app.clone();
    listen(&share, "click", move |_| {
        let (renderer, target, certificate) = {
            let state = shared.borrow();
            (
                state.page.certificate_node(),
                state.page.navigator_share(),
                state.session.certificate(),
            )
        };
        let Some(certificate) = certificate else {
            return;
        };
        spawn_local(async move {
            share_certificate(&renderer, &target, &certificate).await;
        });
    })?;
    Ok(())
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    init_logging();
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let page = Page::find(window.clone())?;

    let nodes = page.document.query_selector_all(".scratch-card")?;
    let mut cards = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        if let Some(node) = nodes.get(i) {
            let root = node.dyn_into::<HtmlElement>().map_err(JsValue::from)?;
            cards.push(Card::find(root)?);
        }
    }

    let catalog = build_catalog();
    if cards.len() != catalog.len() {
        warn!(cards = cards.len(), prizes = catalog.len(), "card count does not match catalog");
    }
    let session = Session::start(LocalStore::new(&window), catalog);
    let restored = session.is_restored();
    let app: Shared = Rc::new(RefCell::new(App {
        page,
        cards,
        session,
    }));

    let card_count = app.borrow().cards.len();
    for slot in 0..card_count {
        wire_card(&app, slot)?;
    }
    wire_controls(&app)?;

    {
        let state = app.borrow();
        state.page.set_title(&state.session.state().status_text());
        if restored {
            add_class(&state.page.body, "selection-done");
            for (card, slot) in state.cards.iter().zip(state.session.state().slots.iter()) {
                if slot.scratched {
                    add_class(&card.root, "is-scratched");
                }
            }
        }
    }

    // Paint after layout so the canvases can take the card size.
    let shared = app.clone();
    let paint = Closure::once_into_js(move || {
        let mut state = shared.borrow_mut();
        state.paint_all();
        if restored {
            state.announce();
        }
    });
    window.request_animation_frame(paint.unchecked_ref())?;
    info!(restored, "scratch card ready");
    Ok(())
}
