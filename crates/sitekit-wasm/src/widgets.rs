//! DOM wiring for the page widgets.
//!
//! Each `init_*` function looks up its elements and returns `Ok(())`
//! without doing anything when the page does not have them.

use crate::dom::{self, query, query_all, set_style};
use crate::error::{Result, WasmError};
use crate::timers;
use sitekit_core::widgets::accordion::{CHEVRON_DOWN, CHEVRON_UP};
use sitekit_core::widgets::menu::ACTIVE_CLASS;
use sitekit_core::widgets::scroll::{
    REVEAL_CLASS, REVEAL_ROOT_MARGIN, REVEAL_SELECTOR, REVEAL_THRESHOLD,
};
use sitekit_core::widgets::{
    AUTO_ROTATE_INTERVAL, Accordion, Carousel, MenuState, SlideChange, anchor_scroll_target,
    back_to_top_visible, chart_reveal_schedule, header_style, is_scroll_anchor,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Node, ScrollBehavior, ScrollToOptions, Window,
};

const FADE_KEYFRAMES: &str = "@keyframes fadeIn { from { opacity: 0; transform: translateY(10px); } to { opacity: 1; transform: translateY(0); } } \
@keyframes fadeOut { from { opacity: 1; transform: translateY(0); } to { opacity: 0; transform: translateY(-10px); } }";

const BACK_TO_TOP_CSS: &str = "position: fixed; bottom: 30px; right: 30px; width: 50px; height: 50px; \
border-radius: 50%; background: linear-gradient(135deg, var(--accent-gold) 0%, var(--accent-gold-dark) 100%); \
color: white; border: none; cursor: pointer; opacity: 0; visibility: hidden; transition: all 0.3s ease; \
z-index: 9999; box-shadow: 0 4px 15px rgba(217, 119, 6, 0.4); font-size: 1.2rem;";

fn listen<F>(target: &web_sys::EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| WasmError::dom_with_cause(format!("cannot listen for '{event}'"), &e))?;
    closure.forget();
    Ok(())
}

fn set_class(element: &HtmlElement, class: &str, on: bool) {
    let classes = element.class_list();
    let _ = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

fn scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

fn contains(container: &HtmlElement, event: &Event) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Node>().ok())
        .is_some_and(|node| container.contains(Some(&node)))
}

/// Adds the `fadeIn`/`fadeOut` keyframes used by the accordion and the
/// carousel.
pub fn init_animation_styles(document: &Document) -> Result<()> {
    dom::ensure_style(document, "sitekit-fade-styles", FADE_KEYFRAMES)
}

/// `.menu-toggle` opens and closes `.nav-menu`.
pub fn init_mobile_menu(document: &Document) -> Result<()> {
    let (Some(toggle), Some(menu)) = (query(document, ".menu-toggle"), query(document, ".nav-menu"))
    else {
        return Ok(());
    };
    let state = Rc::new(Cell::new(MenuState::default()));

    let render = {
        let (toggle, menu) = (toggle.clone(), menu.clone());
        move |state: MenuState| {
            set_class(&toggle, ACTIVE_CLASS, state.is_open());
            set_class(&menu, ACTIVE_CLASS, state.is_open());
        }
    };
    let render = Rc::new(render);

    {
        let (state, render) = (Rc::clone(&state), Rc::clone(&render));
        listen(&toggle, "click", move |_| {
            let mut menu_state = state.get();
            menu_state.toggle();
            state.set(menu_state);
            render(menu_state);
        })?;
    }

    let links = menu
        .query_selector_all(".nav-link")
        .map_err(|e| WasmError::dom_with_cause("cannot list nav links", &e))?;
    for link in (0..links.length()).filter_map(|i| links.get(i)) {
        let (state, render) = (Rc::clone(&state), Rc::clone(&render));
        listen(&link, "click", move |_| {
            let mut menu_state = state.get();
            menu_state.close();
            state.set(menu_state);
            render(menu_state);
        })?;
    }

    listen(document, "click", move |event| {
        let mut menu_state = state.get();
        menu_state.document_click(contains(&toggle, &event), contains(&menu, &event));
        state.set(menu_state);
        render(menu_state);
    })
}

/// Compacts `.header` once the page is scrolled.
pub fn init_header_scroll(document: &Document) -> Result<()> {
    let Some(header) = query(document, ".header") else {
        return Ok(());
    };
    let window = dom::window()?;
    let scroller = window.clone();
    listen(&window, "scroll", move |_| {
        let style = header_style(scroller.scroll_y().unwrap_or_default());
        set_class(&header, "scrolled", style.scrolled);
        set_style(&header, "height", &style.height());
    })
}

/// Reveals `.fade-in`, `.slide-left` and `.slide-right` elements as they
/// enter the viewport.
pub fn init_scroll_reveal(document: &Document) -> Result<()> {
    let elements = query_all(document, REVEAL_SELECTOR)?;
    if elements.is_empty() {
        return Ok(());
    }

    let supported = js_sys::Reflect::has(&dom::window()?, &"IntersectionObserver".into())
        .unwrap_or(false);
    if !supported {
        for element in &elements {
            set_class(element, REVEAL_CLASS, true);
        }
        return Ok(());
    }

    let on_intersect = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    let _ = target.class_list().add_1(REVEAL_CLASS);
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);
    let observer = IntersectionObserver::new_with_options(
        on_intersect.as_ref().unchecked_ref(),
        &options,
    )
    .map_err(|e| WasmError::dom_with_cause("cannot create IntersectionObserver", &e))?;
    on_intersect.forget();

    for element in &elements {
        observer.observe(element);
    }
    Ok(())
}

/// In-page anchors scroll smoothly, leaving room for the fixed header.
pub fn init_smooth_scroll(document: &Document) -> Result<()> {
    let window = dom::window()?;
    for anchor in query_all(document, r##"a[href^="#"]"##)? {
        let (document, window, link) = (document.clone(), window.clone(), anchor.clone());
        listen(&anchor, "click", move |event| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            if !is_scroll_anchor(&href) {
                return;
            }
            event.prevent_default();
            let Some(target) = query(&document, &href) else {
                return;
            };
            let header_height = query(&document, ".header")
                .map(|h| f64::from(h.offset_height()))
                .unwrap_or_default();
            let top = anchor_scroll_target(
                target.get_bounding_client_rect().top(),
                window.page_y_offset().unwrap_or_default(),
                header_height,
            );
            scroll_to(&window, top);
        })?;
    }
    Ok(())
}

/// `.why-feature` items behave as an accordion.
pub fn init_faq(document: &Document) -> Result<()> {
    let items = query_all(document, ".why-feature")?;
    if items.is_empty() {
        return Ok(());
    }
    let accordion = Rc::new(RefCell::new(Accordion::new(items.len())));
    let items = Rc::new(items);

    for index in 0..items.len() {
        let (accordion, all) = (Rc::clone(&accordion), Rc::clone(&items));
        listen(&items[index], "click", move |_| {
            let (before, after) = {
                let mut accordion = accordion.borrow_mut();
                let before = accordion.open_index();
                accordion.toggle(index);
                (before, accordion.open_index())
            };
            let accordion = accordion.borrow();
            for changed in [before, after].into_iter().flatten() {
                render_faq_item(&all[changed], accordion.is_open(changed));
            }
        })?;
    }
    Ok(())
}

fn render_faq_item(item: &HtmlElement, open: bool) {
    if let Some(answer) = item
        .query_selector("p")
        .ok()
        .flatten()
        .and_then(|p| p.dyn_into::<HtmlElement>().ok())
    {
        set_style(&answer, "display", if open { "block" } else { "none" });
        if open {
            set_style(&answer, "animation", "fadeIn 0.3s ease");
        }
    }

    let (from, to) = if open {
        (CHEVRON_DOWN, CHEVRON_UP)
    } else {
        (CHEVRON_UP, CHEVRON_DOWN)
    };
    if let Some(icon) = item.query_selector(&format!(".{from}")).ok().flatten() {
        let _ = icon.class_list().remove_1(from);
        let _ = icon.class_list().add_1(to);
    }
}

/// Grows the hero `.chart-bar` elements one after another.
pub fn init_chart(document: &Document) -> Result<()> {
    let bars = query_all(document, ".chart-bar")?;
    for bar in &bars {
        set_style(bar, "transform", "scaleY(0)");
        set_style(bar, "transform-origin", "bottom");
        set_style(bar, "opacity", "0");
    }
    let schedule = chart_reveal_schedule(bars.len());
    for (bar, delay) in bars.into_iter().zip(schedule) {
        timers::set_timeout(delay, move || {
            set_style(&bar, "transform", "scaleY(1)");
            set_style(&bar, "opacity", "1");
        })?;
    }
    Ok(())
}

/// Shows one `.testimonial-card` at a time, driven by `.dot` clicks and a
/// timer.
pub fn init_testimonials(document: &Document) -> Result<()> {
    let cards = query_all(document, ".testimonial-card")?;
    let Some(carousel) = Carousel::new(cards.len()) else {
        return Ok(());
    };
    let dots = query_all(document, ".dot")?;

    for card in &cards {
        set_style(card, "display", "none");
    }
    set_style(&cards[0], "display", "block");

    let slides = Rc::new(Slides {
        carousel: Cell::new(carousel),
        cards,
        dots,
    });

    for (index, dot) in slides.dots.iter().enumerate() {
        let slides = Rc::clone(&slides);
        listen(dot, "click", move |_| slides.go_to(index))?;
    }

    timers::set_interval(AUTO_ROTATE_INTERVAL, move || slides.advance())?;
    Ok(())
}

struct Slides {
    carousel: Cell<Carousel>,
    cards: Vec<HtmlElement>,
    dots: Vec<HtmlElement>,
}

impl Slides {
    fn go_to(&self, index: usize) {
        let mut carousel = self.carousel.get();
        if let Some(change) = carousel.go_to(index) {
            self.carousel.set(carousel);
            self.render(change);
        }
    }

    fn advance(&self) {
        let mut carousel = self.carousel.get();
        let change = carousel.advance();
        self.carousel.set(carousel);
        self.render(change);
    }

    fn render(&self, change: SlideChange) {
        if let Some(card) = self.cards.get(change.from) {
            set_style(card, "display", "none");
            set_style(card, "animation", "fadeOut 0.3s ease");
        }
        if let Some(dot) = self.dots.get(change.from) {
            set_class(dot, ACTIVE_CLASS, false);
        }
        if let Some(card) = self.cards.get(change.to) {
            set_style(card, "display", "block");
            set_style(card, "animation", "fadeIn 0.3s ease");
        }
        if let Some(dot) = self.dots.get(change.to) {
            set_class(dot, ACTIVE_CLASS, true);
        }
    }
}

/// Adds the floating "back to top" button.
pub fn init_back_to_top(document: &Document) -> Result<()> {
    let button = document
        .create_element("button")
        .map_err(|e| WasmError::dom_with_cause("cannot create back-to-top button", &e))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| WasmError::dom("back-to-top button is not an HTML element"))?;
    button.set_inner_html(r#"<i class="fas fa-arrow-up"></i>"#);
    button.set_class_name("back-to-top");
    button.style().set_css_text(BACK_TO_TOP_CSS);
    dom::body(document)?
        .append_child(&button)
        .map_err(|e| WasmError::dom_with_cause("cannot add back-to-top button", &e))?;

    let window = dom::window()?;
    {
        let (scroller, button) = (window.clone(), button.clone());
        listen(&window, "scroll", move |_| {
            let visible = back_to_top_visible(scroller.scroll_y().unwrap_or_default());
            set_style(&button, "opacity", if visible { "1" } else { "0" });
            set_style(&button, "visibility", if visible { "visible" } else { "hidden" });
        })?;
    }

    listen(&button, "click", move |_| scroll_to(&window, 0.0))
}
