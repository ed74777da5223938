mod app;
mod settings;
mod workers;

use app::App;

fn main() -> iced::Result {
    env_logger::init();

    iced::application(App::new, App::update, App::view)
        .title("VidScribe")
        .subscription(App::subscription)
        .window(iced::window::Settings {
            size: iced::Size::new(560.0, 680.0),
            ..Default::default()
        })
        .run()
}
