fn main() {
    yew::start_app::<web::Model>();
}
