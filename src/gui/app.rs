use std::path::PathBuf;

use iced::widget::image::Handle;
use iced::widget::{Column, button, column, container, row, scrollable, text};
use iced::{Element, Length, Task, Theme};
use rfd::{AsyncFileDialog, AsyncMessageDialog};

use super::{AppState, Message};

/// Launches the application window and runs the event loop to completion.
pub fn run() -> iced::Result {
    iced::application(DnnApp::new, DnnApp::update, DnnApp::view)
        .title("SSD Object Detection")
        .theme(DnnApp::theme)
        .window_size((900.0, 620.0))
        .run()
}

pub struct DnnApp {
    state: AppState,
    /// Widget handle for the current display image, rebuilt whenever the
    /// display copy changes.
    frame: Option<Handle>,
}

impl DnnApp {
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
            frame: None,
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn refresh_frame(&mut self) {
        self.frame = self.state.display.as_ref().map(|img| {
            let mut rgba = Vec::with_capacity(img.as_raw().len() / 3 * 4);
            for pixel in img.pixels() {
                rgba.extend_from_slice(&[pixel[0], pixel[1], pixel[2], 255]);
            }
            Handle::from_rgba(img.width(), img.height(), rgba)
        });
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LoadImagePressed => Task::perform(pick_image(), Message::ImageFileChosen),
            Message::ImageFileChosen(None) => Task::none(),
            Message::ImageFileChosen(Some(path)) => {
                if self.state.load_image(&path) {
                    self.refresh_frame();
                }
                Task::none()
            }
            Message::LoadModelPressed => {
                Task::perform(pick_class_names(), Message::ClassNamesChosen)
            }
            Message::ClassNamesChosen(choice) => {
                if self.state.load_class_names(choice.as_deref()) {
                    Task::perform(pick_model(), Message::ModelFileChosen)
                } else {
                    Task::none()
                }
            }
            Message::ModelFileChosen(None) => Task::none(),
            Message::ModelFileChosen(Some(model)) => Task::perform(pick_config(), move |config| {
                Message::ConfigFileChosen {
                    model: model.clone(),
                    config,
                }
            }),
            Message::ConfigFileChosen { model, config } => {
                self.state.load_network(&model, config.as_deref());
                Task::none()
            }
            Message::DetectPressed => {
                if self.state.detect() {
                    self.refresh_frame();
                }
                Task::none()
            }
            Message::ResetPressed => {
                if self.state.reset() {
                    self.refresh_frame();
                }
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let image_panel: Element<'_, Message> = match &self.frame {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => container(text("No Image Loaded"))
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
        };

        let controls = row![
            button("Load Image").on_press(Message::LoadImagePressed),
            button("Load Model").on_press(Message::LoadModelPressed),
            button("Detect Objects")
                .on_press_maybe(self.state.can_detect().then_some(Message::DetectPressed)),
            button("Reset Image")
                .on_press_maybe(self.state.can_reset().then_some(Message::ResetPressed)),
        ]
        .spacing(10);

        let left = column![image_panel, controls]
            .spacing(10)
            .width(Length::FillPortion(3));

        let log_lines = Column::with_children(
            self.state
                .log
                .iter()
                .map(|line| text(line.as_str()).size(13).into()),
        )
        .spacing(2);

        let right = column![
            text(self.state.results_text.as_str()),
            scrollable(log_lines).height(Length::Fill),
        ]
        .spacing(10)
        .width(Length::FillPortion(2));

        container(row![left, right].spacing(15))
            .padding(15)
            .into()
    }
}

impl Default for DnnApp {
    fn default() -> Self {
        Self::new()
    }
}

async fn pick_image() -> Option<PathBuf> {
    AsyncFileDialog::new()
        .set_title("Open Image")
        .add_filter("Image Files", &["png", "jpg", "jpeg", "bmp", "tiff"])
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

async fn pick_class_names() -> Option<PathBuf> {
    AsyncMessageDialog::new()
        .set_title("Info")
        .set_description("Please select class names file (e.g., coco.names)")
        .show()
        .await;
    AsyncFileDialog::new()
        .set_title("Open Class Names File")
        .add_filter("Text Files", &["txt"])
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

async fn pick_model() -> Option<PathBuf> {
    AsyncMessageDialog::new()
        .set_title("Info")
        .set_description("Please select model file (e.g., model.onnx)")
        .show()
        .await;
    AsyncFileDialog::new()
        .set_title("Open SSD Detection Model")
        .add_filter("Model Files", &["pb", "onnx", "caffemodel", "t7"])
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

async fn pick_config() -> Option<PathBuf> {
    AsyncMessageDialog::new()
        .set_title("Info")
        .set_description("Please select configuration file (e.g., config.pbtxt)")
        .show()
        .await;
    AsyncFileDialog::new()
        .set_title("Open Config File (Optional)")
        .add_filter("Config Files", &["prototxt", "pbtxt"])
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}
