use crate::utils::error::Result;

/// Extract → transform → load 三段式管道，每個工具各自實作一次。
/// load 回傳一行給使用者看的摘要。
pub trait Pipeline {
    type Extracted;
    type Transformed;

    fn extract(&self) -> Result<Self::Extracted>;
    fn transform(&self, data: Self::Extracted) -> Result<Self::Transformed>;
    fn load(&self, result: Self::Transformed) -> Result<String>;
}
