mod api;
mod config;
mod db;
mod pages;
mod session;

use std::rc::Rc;

use yew::prelude::*;

use config::Config;
use pages::checking::CheckingPage;
use pages::landing::LandingPage;
use session::Session;

enum Page {
    Landing,
    Checking,
}

enum Msg {
    Enter,
    Register,
    BackToHome,
}

/// App shell: owns the endpoint configuration and the session, and switches
/// between the landing page and the checking workflow. The login/register
/// flow itself lives outside this app; it writes the session keys and sends
/// the browser back here.
struct App {
    page: Page,
    session: Option<Session>,
    config: Rc<Config>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            page: Page::Landing,
            session: Session::load(),
            config: Rc::new(Config::default()),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Enter => {
                self.session = Session::load();
                match &self.session {
                    Some(_) => {
                        self.page = Page::Checking;
                        true
                    }
                    None => {
                        redirect(&self.config.login_url);
                        false
                    }
                }
            }
            Msg::Register => {
                redirect(&self.config.register_url);
                false
            }
            Msg::BackToHome => {
                // Logout may have cleared the keys; re-read rather than trust
                // the cached copy.
                self.session = Session::load();
                self.page = Page::Landing;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        match (&self.page, &self.session) {
            (Page::Checking, Some(session)) => html! {
                <CheckingPage
                    session={session.clone()}
                    config={self.config.clone()}
                    on_back_to_home={link.callback(|_| Msg::BackToHome)}
                />
            },
            _ => html! {
                <LandingPage
                    on_login={link.callback(|_| Msg::Enter)}
                    on_register={link.callback(|_| Msg::Register)}
                />
            },
        }
    }
}

fn redirect(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().set_href(url) {
            log::error!("navigation failed: {err:?}");
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<App>::new().render();
}
