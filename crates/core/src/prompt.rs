//! Prompt sent to the text producer.
//!
//! The user message spells out the block grammar the parser expects, so the
//! producer's answer can be compiled without a schema.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Slide counts accepted by the generator.
pub const SLIDE_COUNT_RANGE: RangeInclusive<usize> = 5..=50;

/// Default requested slide count.
pub const DEFAULT_SLIDE_COUNT: usize = 10;

/// Cover, table of contents, conclusion and references.
const FIXED_SLIDES: usize = 4;

/// Topic and slide count for one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub topic: String,
    pub slide_count: usize,
}

impl PromptTemplate {
    /// Create a prompt for `slide_count` slides about `topic`.
    pub fn new(topic: impl Into<String>, slide_count: usize) -> Self {
        Self {
            topic: topic.into(),
            slide_count,
        }
    }

    /// Number of content pages between the outline and the conclusion.
    pub fn content_page_count(&self) -> usize {
        self.slide_count.saturating_sub(FIXED_SLIDES)
    }

    /// The system message.
    pub fn system_message(&self) -> String {
        format!(
            "你是一个AI助手，负责创建PowerPoint演示文稿。请严格按照要求提供恰好{}张幻灯片的演示文稿内容，遵循以下结构和格式：",
            self.slide_count
        )
    }

    /// The user message describing structure and line grammar.
    pub fn user_message(&self) -> String {
        let n = self.slide_count;
        format!(
            r#"请创建一个关于"{topic}"的演示文稿，严格包含{n}张幻灯片，遵循以下结构和格式：

1. 封面 (1张)
格式：
幻灯片1：封面
标题：[主标题]
副标题：[副标题]

2. 目录 (1张)
格式：
幻灯片2：目录
- [第一章节]
- [第二章节]
- ...

3. 内容页 ({content}张)
格式：
幻灯片[数字]：[章节标题]
- [要点1]
- [要点2]
- ...
[建议插入的图片描述]

4. 结论 (1张)
格式：
幻灯片[数字]：结论
- [总结要点1]
- [总结要点2]
- ...

5. 参考资料 (1张)
格式：
幻灯片[数字]：参考资料
- [参考资料1]
- [参考资料2]
- ...

请确保每张幻灯片的格式严格遵循上述要求。特别注意：
1. 每张幻灯片必须以"幻灯片[数字]："开头，其中[数字]必须是一个有效的整数。
2. 封面幻灯片的标题和副标题必须分别以"标题："和"副标题："开头。
3. 其他幻灯片的内容使用短横线列表。
4. 对于内容页，请在要点之后添加一行建议插入的图片描述。
5. 所有内容都应该使用中文。
6. 确保总幻灯片数量严格等于{n}张，且幻灯片编号从1开始连续递增。
7. 根据幻灯片数量，合理分配内容，确保每张幻灯片的内容简洁明了，易于理解。"#,
            topic = self.topic,
            n = n,
            content = self.content_page_count(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_page_count() {
        assert_eq!(PromptTemplate::new("AI", 10).content_page_count(), 6);
        assert_eq!(PromptTemplate::new("AI", 5).content_page_count(), 1);
        assert_eq!(PromptTemplate::new("AI", 2).content_page_count(), 0);
    }

    #[test]
    fn test_messages_mention_topic_and_count() {
        let prompt = PromptTemplate::new("量子计算", 12);
        assert!(prompt.system_message().contains("恰好12张"));

        let user = prompt.user_message();
        assert!(user.contains("关于\"量子计算\"的演示文稿"));
        assert!(user.contains("严格包含12张幻灯片"));
        assert!(user.contains("3. 内容页 (8张)"));
        assert!(user.contains("幻灯片1：封面"));
    }

    #[test]
    fn test_slide_count_range() {
        assert!(SLIDE_COUNT_RANGE.contains(&DEFAULT_SLIDE_COUNT));
        assert!(!SLIDE_COUNT_RANGE.contains(&4));
        assert!(!SLIDE_COUNT_RANGE.contains(&51));
    }
}
