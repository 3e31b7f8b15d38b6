// Platform-agnostic indicator LED trait
pub trait IndicatorTrait: Send + Sync {
    fn set(&self, lit: bool);
}
