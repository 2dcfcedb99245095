/// Landing screen: static marketing copy and the way into the studio
use iced::widget::{button, column, container, row, text, Column};
use iced::{Alignment, Element, Length};

use crate::notice::Notice;
use crate::ui::studio::notice_view;
use crate::Message;

/// "How it works" steps: (title, description)
const STEPS: [(&str, &str); 3] = [
    (
        "1. Upload Your Photo",
        "Take a clear photo of yourself or upload an existing one from your gallery.",
    ),
    (
        "2. Choose Clothing",
        "Paste a link to any clothing item or upload a picture of it.",
    ),
    (
        "3. See Magic Happen",
        "Our AI generates a realistic image of you wearing the selected outfit.",
    ),
];

pub fn view<'a>(backend_status: &'a str, notice: Option<&'a Notice>) -> Element<'a, Message> {
    let steps = STEPS.iter().fold(row![].spacing(24), |r, (title, description)| {
        r.push(
            column![text(*title).size(18), text(*description).size(14)]
                .spacing(6)
                .width(Length::Fixed(240.0)),
        )
    });

    let mut content: Column<Message> = column![
        text("Try Before You Buy").size(48),
        text("See how any outfit looks on you, instantly, with AI virtual try-on.").size(18),
        button(text("Start Try-On").size(18))
            .on_press(Message::OpenStudio)
            .padding(12),
        steps,
        text(backend_status).size(12),
    ]
    .spacing(20)
    .padding(40)
    .align_x(Alignment::Center);

    if let Some(notice) = notice {
        content = content.push(notice_view(notice));
    }

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
