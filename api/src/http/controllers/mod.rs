pub mod analysis;
pub mod assistant;
pub mod form;

pub use analysis as AnalysisController;
pub use assistant as AssistantController;
pub use form as FormController;
