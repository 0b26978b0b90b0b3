pub mod sift;

#[derive(Debug,Clone)]
pub struct Pyramid<T> {
    pub octaves: Vec<T>
}
