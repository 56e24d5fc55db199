mod launch;

fn main() {
    launch::run()
}
