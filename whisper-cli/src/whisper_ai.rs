//! `whisper-ai`: alias of the `whisper` launcher

mod launch;

fn main() {
    launch::run()
}
