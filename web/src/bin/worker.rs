use yew::agent::Threaded;

fn main() {
    yew::initialize();
    web::worker::Worker::register();
    yew::run_loop();
}
