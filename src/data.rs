use crate::models::Item;

pub struct WordEntry {
    pub front: &'static str,
    pub translit: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
}

pub const CHAPTERS: &[(u32, &[WordEntry])] = &[
    (
        1,
        &[
            WordEntry { front: "שלום", translit: "shalom", primary: "你好；平安", secondary: "hello; peace" },
            WordEntry { front: "תודה", translit: "toda", primary: "谢谢", secondary: "thank you" },
            WordEntry { front: "בבקשה", translit: "bevakasha", primary: "请；不客气", secondary: "please; you're welcome" },
            WordEntry { front: "כן", translit: "ken", primary: "是", secondary: "yes" },
            WordEntry { front: "לא", translit: "lo", primary: "不；没有", secondary: "no" },
            WordEntry { front: "סליחה", translit: "slicha", primary: "对不起", secondary: "excuse me; sorry" },
            WordEntry { front: "בוקר טוב", translit: "boker tov", primary: "早上好", secondary: "good morning" },
            WordEntry { front: "לילה טוב", translit: "laila tov", primary: "晚安", secondary: "good night" },
        ],
    ),
    (
        2,
        &[
            WordEntry { front: "אבא", translit: "aba", primary: "爸爸", secondary: "father" },
            WordEntry { front: "אמא", translit: "ima", primary: "妈妈", secondary: "mother" },
            WordEntry { front: "ילד", translit: "yeled", primary: "男孩", secondary: "boy" },
            WordEntry { front: "ילדה", translit: "yalda", primary: "女孩", secondary: "girl" },
            WordEntry { front: "איש", translit: "ish", primary: "男人", secondary: "man" },
            WordEntry { front: "אישה", translit: "isha", primary: "女人", secondary: "woman" },
            WordEntry { front: "משפחה", translit: "mishpacha", primary: "家庭", secondary: "family" },
            WordEntry { front: "חבר", translit: "chaver", primary: "朋友", secondary: "friend" },
        ],
    ),
    (
        3,
        &[
            WordEntry { front: "מים", translit: "mayim", primary: "水", secondary: "water" },
            WordEntry { front: "לחם", translit: "lechem", primary: "面包", secondary: "bread" },
            WordEntry { front: "בית", translit: "bayit", primary: "房子", secondary: "house" },
            WordEntry { front: "ספר", translit: "sefer", primary: "书", secondary: "book" },
            WordEntry { front: "שולחן", translit: "shulchan", primary: "桌子", secondary: "table" },
            WordEntry { front: "כיסא", translit: "kise", primary: "椅子", secondary: "chair" },
            WordEntry { front: "דלת", translit: "delet", primary: "门", secondary: "door" },
            WordEntry { front: "חלון", translit: "chalon", primary: "窗户", secondary: "window" },
        ],
    ),
    (
        4,
        &[
            WordEntry { front: "ללכת", translit: "lalechet", primary: "走；去", secondary: "to go; to walk" },
            WordEntry { front: "לאכול", translit: "le'echol", primary: "吃", secondary: "to eat" },
            WordEntry { front: "לשתות", translit: "lishtot", primary: "喝", secondary: "to drink" },
            WordEntry { front: "לראות", translit: "lir'ot", primary: "看见", secondary: "to see" },
            WordEntry { front: "לדבר", translit: "ledaber", primary: "说话", secondary: "to speak" },
            WordEntry { front: "לקרוא", translit: "likro", primary: "读；叫", secondary: "to read; to call" },
            WordEntry { front: "לכתוב", translit: "lichtov", primary: "写", secondary: "to write" },
            WordEntry { front: "ללמוד", translit: "lilmod", primary: "学习", secondary: "to learn" },
        ],
    ),
    (
        5,
        &[
            WordEntry { front: "אחת", translit: "achat", primary: "一", secondary: "one (f.)" },
            WordEntry { front: "שתיים", translit: "shtayim", primary: "二", secondary: "two (f.)" },
            WordEntry { front: "שלוש", translit: "shalosh", primary: "三", secondary: "three (f.)" },
            WordEntry { front: "יום", translit: "yom", primary: "天；日", secondary: "day" },
            WordEntry { front: "שבוע", translit: "shavua", primary: "星期", secondary: "week" },
            WordEntry { front: "חודש", translit: "chodesh", primary: "月份", secondary: "month" },
            WordEntry { front: "שנה", translit: "shana", primary: "年", secondary: "year" },
            WordEntry { front: "היום", translit: "hayom", primary: "今天", secondary: "today" },
        ],
    ),
];

/// The full word list, read-only to the rest of the app. Item ids are
/// `"{chapter}-{front}"` so progress keys survive reordering within a
/// chapter's table.
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn load() -> Self {
        let items = CHAPTERS
            .iter()
            .flat_map(|(chapter, words)| {
                words.iter().map(move |word| Item {
                    id: format!("{}-{}", chapter, word.front),
                    front: word.front.to_string(),
                    transliteration: word.translit.to_string(),
                    meaning_primary: word.primary.to_string(),
                    meaning_secondary: word.secondary.to_string(),
                    chapter: *chapter,
                })
            })
            .collect();
        Self { items }
    }

    #[cfg(test)]
    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Lowest and highest chapter numbers present, for range selectors.
    pub fn chapter_bounds(&self) -> Option<(u32, u32)> {
        let min = self.items.iter().map(|i| i.chapter).min()?;
        let max = self.items.iter().map(|i| i.chapter).max()?;
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        let catalog = Catalog::load();
        let mut ids: Vec<_> = catalog.items().iter().map(|i| i.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn chapters_are_contiguous_from_one() {
        let catalog = Catalog::load();
        assert_eq!(catalog.chapter_bounds(), Some((1, 5)));
    }
}
