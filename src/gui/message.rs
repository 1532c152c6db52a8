use std::path::PathBuf;

/// Events flowing through the UI shell: the four button presses plus the
/// results of the file dialogs they spawn. `None` paths are cancelled
/// dialogs.
#[derive(Debug, Clone)]
pub enum Message {
    LoadImagePressed,
    ImageFileChosen(Option<PathBuf>),
    LoadModelPressed,
    ClassNamesChosen(Option<PathBuf>),
    ModelFileChosen(Option<PathBuf>),
    ConfigFileChosen {
        model: PathBuf,
        config: Option<PathBuf>,
    },
    DetectPressed,
    ResetPressed,
}
