//! Instruction-text assembly.
//!
//! [`build_instruction`] is a pure function: identical `(config,
//! attachment_count)` inputs always yield a byte-identical string. It
//! never encodes attachments itself; it only reports how many exist so
//! the wording can refer to them.

use crate::models::{ExamConfig, Language};
use crate::services::templates::template_for;

/// Build the full natural-language instruction sent as the first request
/// part. Selects the localized scaffold, interpolates the configuration
/// and appends the LaTeX template verbatim.
pub fn build_instruction(config: &ExamConfig, attachment_count: usize) -> String {
    match config.language {
        Language::Vi => build_vi(config, attachment_count),
        Language::En => build_en(config, attachment_count),
    }
}

fn build_vi(config: &ExamConfig, attachment_count: usize) -> String {
    let topic_clause = if config.topic.trim().is_empty() {
        format!(
            "dựa trên nội dung của {} tài liệu đính kèm",
            attachment_count
        )
    } else {
        format!("về chủ đề \"{}\"", config.topic.trim())
    };

    let data_clause = if config.vary_data {
        "Hãy thay đổi số liệu trong các bài toán để tạo đề mới, giữ nguyên dạng bài."
    } else {
        "Giữ nguyên số liệu gốc trong các bài toán."
    };

    let figure_clause = if config.use_tikz {
        "Nếu cần hình vẽ, hãy vẽ bằng mã TikZ trực tiếp trong tài liệu."
    } else {
        "Nếu cần hình vẽ, hãy chèn ảnh giữ chỗ bằng \\includegraphics và ghi chú tên tệp."
    };

    format!(
        r#"Bạn là giáo viên ra đề. Hãy soạn một đề kiểm tra {topic_clause} cho học sinh LỚP {grade}, mức độ {difficulty}.

Cấu trúc đề:
- {mc} câu trắc nghiệm (4 phương án A, B, C, D, chỉ một đáp án đúng)
- {essay} câu tự luận

{data_clause}
{figure_clause}

Chỉ trả về mã nguồn LaTeX hoàn chỉnh, không giải thích gì thêm. Sử dụng đúng khung mẫu sau:

{template}"#,
        topic_clause = topic_clause,
        grade = config.grade,
        difficulty = config.difficulty.label(Language::Vi),
        mc = config.num_multiple_choice,
        essay = config.num_essay,
        data_clause = data_clause,
        figure_clause = figure_clause,
        template = template_for(Language::Vi),
    )
}

fn build_en(config: &ExamConfig, attachment_count: usize) -> String {
    let topic_clause = if config.topic.trim().is_empty() {
        format!(
            "based on the content of the {} attached document(s)",
            attachment_count
        )
    } else {
        format!("on the topic \"{}\"", config.topic.trim())
    };

    let data_clause = if config.vary_data {
        "Vary the numeric data in the problems to create a fresh paper while keeping the problem types."
    } else {
        "Preserve the original numeric data in the problems."
    };

    let figure_clause = if config.use_tikz {
        "Where a figure is needed, draw it with inline TikZ code."
    } else {
        "Where a figure is needed, insert a placeholder image via \\includegraphics and note the file name."
    };

    format!(
        r#"You are an exam author. Write an examination paper {topic_clause} for GRADE {grade} students at {difficulty} difficulty.

Paper structure:
- {mc} multiple-choice questions (four options A, B, C, D, exactly one correct)
- {essay} essay questions

{data_clause}
{figure_clause}

Return only the complete LaTeX source, with no commentary. Use exactly the following scaffold:

{template}"#,
        topic_clause = topic_clause,
        grade = config.grade,
        difficulty = config.difficulty.label(Language::En),
        mc = config.num_multiple_choice,
        essay = config.num_essay,
        data_clause = data_clause,
        figure_clause = figure_clause,
        template = template_for(Language::En),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, ExamConfig};

    fn en_config() -> ExamConfig {
        ExamConfig {
            topic: "Fractions".to_string(),
            grade: "6".to_string(),
            difficulty: Difficulty::Medium,
            num_multiple_choice: 10,
            num_essay: 2,
            use_tikz: false,
            vary_data: false,
            language: Language::En,
        }
    }

    #[test]
    fn identical_inputs_yield_identical_text() {
        let config = en_config();
        assert_eq!(build_instruction(&config, 2), build_instruction(&config, 2));
    }

    #[test]
    fn english_prompt_interpolates_config() {
        let instruction = build_instruction(&en_config(), 0);
        assert!(instruction.contains("GRADE 6"));
        assert!(instruction.contains("\"Fractions\""));
        assert!(instruction.contains("10 multiple-choice"));
        assert!(instruction.contains("2 essay"));
        assert!(instruction.contains("medium difficulty"));
        assert!(instruction.ends_with("\\end{document}"));
    }

    #[test]
    fn empty_topic_falls_back_to_attachments() {
        let mut config = en_config();
        config.topic = "   ".to_string();
        let instruction = build_instruction(&config, 3);
        assert!(instruction.contains("the 3 attached document(s)"));
        assert!(!instruction.contains("topic \""));
    }

    #[test]
    fn vietnamese_prompt_uses_localized_scaffold() {
        let mut config = en_config();
        config.language = Language::Vi;
        config.topic = "Phân số".to_string();
        let instruction = build_instruction(&config, 0);
        assert!(instruction.contains("LỚP 6"));
        assert!(instruction.contains("Trung bình"));
        assert!(instruction.contains("ĐỀ KIỂM TRA"));
    }

    #[test]
    fn option_flags_switch_prompt_clauses() {
        let mut config = en_config();

        config.use_tikz = true;
        config.vary_data = true;
        let instruction = build_instruction(&config, 0);
        assert!(instruction.contains("inline TikZ"));
        assert!(instruction.contains("Vary the numeric data"));

        config.use_tikz = false;
        config.vary_data = false;
        let instruction = build_instruction(&config, 0);
        assert!(instruction.contains("placeholder image"));
        assert!(instruction.contains("Preserve the original numeric data"));
    }
}
