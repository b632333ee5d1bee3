//! Marketing landing page with the scroll-triggered stats counter.

use gloo_events::EventListener;
use gloo_timers::callback::Interval;
use yew::prelude::*;

use self::counter::{StatCounts, DURATION_MS, STEPS};

/// How far the stats block must rise above the viewport bottom before the
/// counters start.
const REVEAL_MARGIN_PX: f64 = 100.0;

#[derive(Properties, PartialEq)]
pub struct LandingProps {
    pub on_login: Callback<()>,
    pub on_register: Callback<()>,
}

pub enum Msg {
    CheckStatsVisible,
    Tick,
}

pub struct LandingPage {
    counts: StatCounts,
    step: u32,
    animation: Option<Interval>,
    scroll_listener: Option<EventListener>,
    stats_ref: NodeRef,
}

impl Component for LandingPage {
    type Message = Msg;
    type Properties = LandingProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            counts: counter::ZERO,
            step: 0,
            animation: None,
            scroll_listener: None,
            stats_ref: NodeRef::default(),
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        let link = ctx.link().clone();
        let window = web_sys::window().expect("no global `window` exists");
        self.scroll_listener = Some(EventListener::new(&window, "scroll", move |_| {
            link.send_message(Msg::CheckStatsVisible);
        }));
        // The stats block may already be in view on a tall screen.
        ctx.link().send_message(Msg::CheckStatsVisible);
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::CheckStatsVisible => self.handle_check_stats_visible(ctx),
            Msg::Tick => self.handle_tick(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="landing-page">
                { self.render_header(ctx) }
                <main>
                    { self.render_hero(ctx) }
                    { self.render_stats() }
                    { render_how_it_works() }
                    { render_contact() }
                </main>
                { render_footer() }
            </div>
        }
    }
}

// Handler methods
impl LandingPage {
    /// Starts the counter animation the first time the stats section scrolls
    /// into view. Runs at most once; afterwards the listener is dropped.
    fn handle_check_stats_visible(&mut self, ctx: &Context<Self>) -> bool {
        if self.animation.is_some() || self.step > 0 {
            return false;
        }
        let Some(element) = self.stats_ref.cast::<web_sys::Element>() else {
            return false;
        };
        let viewport_height = web_sys::window()
            .and_then(|w| w.inner_height().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        if element.get_bounding_client_rect().top() > viewport_height - REVEAL_MARGIN_PX {
            return false;
        }

        self.scroll_listener = None;
        let link = ctx.link().clone();
        self.animation = Some(Interval::new(DURATION_MS / STEPS, move || {
            link.send_message(Msg::Tick);
        }));
        false
    }

    fn handle_tick(&mut self) -> bool {
        self.step += 1;
        self.counts = counter::counts_at(self.step);
        if self.step >= STEPS {
            self.animation = None;
        }
        true
    }
}

// Rendering methods
impl LandingPage {
    fn render_header(&self, ctx: &Context<Self>) -> Html {
        let on_login = ctx.props().on_login.clone();
        let on_register = ctx.props().on_register.clone();

        html! {
            <header class="app-header">
                <div class="header-brand">
                    <h1>{"ArsenicDetect"}</h1>
                    <p class="subtitle">{"Image-based Arsenic Detection"}</p>
                </div>
                <nav>
                    <ul>
                        <li><a href="#">{"Home"}</a></li>
                        <li>
                            <button onclick={Callback::from(move |_| on_login.emit(()))}>
                                {"Login"}
                            </button>
                        </li>
                        <li>
                            <button onclick={Callback::from(move |_| on_register.emit(()))}>
                                {"Register"}
                            </button>
                        </li>
                        <li><a href="#about">{"About"}</a></li>
                        <li><a href="#contact">{"Contact"}</a></li>
                    </ul>
                </nav>
            </header>
        }
    }

    fn render_hero(&self, ctx: &Context<Self>) -> Html {
        let on_login = ctx.props().on_login.clone();

        html! {
            <section class="hero">
                <div class="hero-copy">
                    <h2>
                        {"Advanced "}<span class="accent">{"Arsenic Detection"}</span>
                        {" Through Image Processing"}
                    </h2>
                    <p>{"Upload your water test strip image and get instant, accurate results powered by AI."}</p>
                    <button class="cta-btn" onclick={Callback::from(move |_| on_login.emit(()))}>
                        {"Get Started Now"}<i class="fa-solid fa-arrow-right"></i>
                    </button>
                </div>
                <div class="hero-art">
                    <img src="/drop.gif" alt="Water test" />
                </div>
            </section>
        }
    }

    fn render_stats(&self) -> Html {
        html! {
            <section class="stats-grid" ref={self.stats_ref.clone()}>
                <div class="stat">
                    <div class="stat-value">
                        { counter::group_thousands(self.counts.images) }
                        <span class="stat-suffix">{"+"}</span>
                    </div>
                    <p>{"Images Analyzed"}</p>
                </div>
                <div class="stat">
                    <div class="stat-value">
                        { counter::format_accuracy(self.counts.accuracy) }
                        <span class="stat-suffix">{"%"}</span>
                    </div>
                    <p>{"Model Accuracy"}</p>
                </div>
                <div class="stat">
                    <div class="stat-value">
                        { self.counts.countries.to_string() }
                        <span class="stat-suffix">{"+"}</span>
                    </div>
                    <p>{"Countries Reached"}</p>
                </div>
            </section>
        }
    }
}

fn render_how_it_works() -> Html {
    let steps = [
        ("fa-camera", "Capture Image", "Take a clean photo of the water test strip."),
        ("fa-cloud-arrow-up", "Upload Image", "Upload safely to our secure server."),
        ("fa-brain", "AI Analysis", "Deep learning model processes the image."),
        ("fa-chart-column", "Get Results", "See accurate arsenic levels instantly."),
    ];

    html! {
        <section id="about" class="how-it-works">
            <h2>{"How It Works"}</h2>
            <div class="step-grid">
                { for steps.iter().map(|(icon, title, text)| html! {
                    <div class="step-card">
                        <i class={classes!("fa-solid", *icon)}></i>
                        <h3>{ *title }</h3>
                        <p>{ *text }</p>
                    </div>
                }) }
            </div>
        </section>
    }
}

fn render_contact() -> Html {
    html! {
        <section id="contact" class="contact">
            <h2>{"Contact Us"}</h2>
            <form>
                <input type="text" placeholder="Your Name" />
                <input type="email" placeholder="Your Email" />
                <textarea placeholder="Your Message"></textarea>
                <button type="button">{"Send Message"}</button>
            </form>
        </section>
    }
}

fn render_footer() -> Html {
    html! {
        <footer class="app-footer">
            <p>{"© 2025 ArsenicDetect. All rights reserved."}</p>
            <div class="socials">
                <a href="#"><i class="fa-brands fa-facebook"></i></a>
                <a href="#"><i class="fa-brands fa-twitter"></i></a>
                <a href="#"><i class="fa-brands fa-linkedin"></i></a>
            </div>
        </footer>
    }
}

/// Counter interpolation for the headline statistics. Pure so the animation
/// math is testable off the DOM.
pub(crate) mod counter {
    pub const STEPS: u32 = 60;
    pub const DURATION_MS: u32 = 2200;

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct StatCounts {
        pub images: u32,
        pub accuracy: f64,
        pub countries: u32,
    }

    pub const ZERO: StatCounts = StatCounts {
        images: 0,
        accuracy: 0.0,
        countries: 0,
    };

    pub const TARGETS: StatCounts = StatCounts {
        images: 25_000,
        accuracy: 95.0,
        countries: 120,
    };

    /// Linear interpolation toward the targets. The final step snaps to the
    /// exact figures so rounding never over- or undershoots.
    pub fn counts_at(step: u32) -> StatCounts {
        if step >= STEPS {
            return TARGETS;
        }
        let t = f64::from(step) / f64::from(STEPS);
        StatCounts {
            images: (f64::from(TARGETS.images) * t).floor() as u32,
            accuracy: (TARGETS.accuracy * t * 10.0).floor() / 10.0,
            countries: (f64::from(TARGETS.countries) * t).round() as u32,
        }
    }

    /// "25000" -> "25,000".
    pub fn group_thousands(value: u32) -> String {
        let digits = value.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        grouped
    }

    /// Accuracy shows one decimal mid-animation and a bare integer at rest.
    pub fn format_accuracy(value: f64) -> String {
        if value.fract() == 0.0 {
            format!("{}", value as u32)
        } else {
            format!("{value:.1}")
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn animation_starts_at_zero() {
            assert_eq!(counts_at(0), ZERO);
        }

        #[test]
        fn final_step_snaps_to_exact_targets() {
            assert_eq!(counts_at(STEPS), TARGETS);
            assert_eq!(counts_at(STEPS + 5), TARGETS);
        }

        #[test]
        fn counters_are_monotonic_and_bounded() {
            let mut previous = ZERO;
            for step in 1..=STEPS {
                let current = counts_at(step);
                assert!(current.images >= previous.images);
                assert!(current.accuracy >= previous.accuracy);
                assert!(current.countries >= previous.countries);
                assert!(current.images <= TARGETS.images);
                assert!(current.accuracy <= TARGETS.accuracy);
                assert!(current.countries <= TARGETS.countries);
                previous = current;
            }
        }

        #[test]
        fn thousands_are_grouped() {
            assert_eq!(group_thousands(0), "0");
            assert_eq!(group_thousands(999), "999");
            assert_eq!(group_thousands(1_000), "1,000");
            assert_eq!(group_thousands(25_000), "25,000");
            assert_eq!(group_thousands(1_234_567), "1,234,567");
        }

        #[test]
        fn accuracy_drops_the_decimal_at_rest() {
            assert_eq!(format_accuracy(95.0), "95");
            assert_eq!(format_accuracy(47.5), "47.5");
            assert_eq!(format_accuracy(0.0), "0");
        }
    }
}
