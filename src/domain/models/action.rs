use super::PipelinePrompt;

pub enum Action {
    PipelineRequest(PipelinePrompt),
}
