//! Post form - text fields shared by the create screen and the edit dialog

use crate::messages::ui_events::FormField;

/// Field contents plus focus and cursor. One instance per form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostForm {
    pub title: String,
    pub description: String,
    /// Path of the image file to upload. Blank in the edit dialog means keep.
    pub image_path: String,
    pub focus: FormField,
    /// Byte offset into the focused field
    pub cursor: usize,
}

impl PostForm {
    /// Form seeded with existing text and an empty image field
    pub fn seeded(title: &str, description: &str) -> Self {
        PostForm {
            title: title.to_string(),
            description: description.to_string(),
            cursor: title.len(),
            ..PostForm::default()
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::Image => &self.image_path,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
            FormField::Image => &mut self.image_path,
        }
    }

    /// Move focus and put the cursor at the end of the new field
    pub fn focus_field(&mut self, field: FormField) {
        self.focus = field;
        self.cursor = self.field(field).len();
    }

    pub fn next_field(&mut self) {
        self.focus_field(self.focus.next());
    }

    pub fn prev_field(&mut self) {
        self.focus_field(self.focus.prev());
    }

    /// First required field that is empty, in display order
    pub fn first_empty(&self, include_image: bool) -> Option<FormField> {
        if self.title.is_empty() {
            Some(FormField::Title)
        } else if self.description.is_empty() {
            Some(FormField::Description)
        } else if include_image && self.image_path.trim().is_empty() {
            Some(FormField::Image)
        } else {
            None
        }
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.field(self.focus);
        if self.cursor > 0 {
            let new_pos = input[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.field(self.focus);
        if self.cursor < input.len() {
            let new_pos = input[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(input.len());
            self.cursor = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor = self.cursor;
        let input = self.focused_mut();
        if cursor <= input.len() {
            input.insert(cursor, c);
            self.cursor = cursor + c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            let cursor = self.cursor;
            let input = self.focused_mut();
            let prev = input[..cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev);
            self.cursor = prev;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_backspace_handle_multibyte() {
        let mut form = PostForm::default();
        for c in "café".chars() {
            form.enter_char(c);
        }
        assert_eq!(form.title, "café");
        form.delete_char();
        assert_eq!(form.title, "caf");
        assert_eq!(form.cursor, 3);
    }

    #[test]
    fn test_insert_in_the_middle() {
        let mut form = PostForm::seeded("ac", "");
        form.move_cursor_left();
        form.enter_char('b');
        assert_eq!(form.title, "abc");
        form.move_cursor_right();
        assert_eq!(form.cursor, 3);
        form.move_cursor_right();
        assert_eq!(form.cursor, 3);
    }

    #[test]
    fn test_focus_moves_cursor_to_field_end() {
        let mut form = PostForm::seeded("title", "longer description");
        form.next_field();
        assert_eq!(form.focus, FormField::Description);
        assert_eq!(form.cursor, "longer description".len());
        form.enter_char('!');
        assert_eq!(form.description, "longer description!");
    }

    #[test]
    fn test_first_empty_field() {
        let mut form = PostForm::seeded("t", "d");
        assert_eq!(form.first_empty(false), None);
        assert_eq!(form.first_empty(true), Some(FormField::Image));
        form.image_path = "a.png".into();
        assert_eq!(form.first_empty(true), None);
        form.title.clear();
        assert_eq!(form.first_empty(true), Some(FormField::Title));
    }
}
