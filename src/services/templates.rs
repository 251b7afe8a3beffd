//! Fixed LaTeX scaffolds per output language.
//!
//! The prompt builder treats these as opaque strings and appends the
//! selected one verbatim at the end of the instruction text. The model is
//! asked to keep the preamble and fill in the question environments.

use crate::models::Language;

/// Scaffold for the selected output language.
pub fn template_for(language: Language) -> &'static str {
    match language {
        Language::Vi => EXAM_TEMPLATE_VI,
        Language::En => EXAM_TEMPLATE_EN,
    }
}

pub const EXAM_TEMPLATE_VI: &str = r#"\documentclass[12pt,a4paper]{article}
\usepackage[utf8]{inputenc}
\usepackage[vietnamese]{babel}
\usepackage{amsmath,amssymb}
\usepackage{enumitem}
\usepackage{tikz}
\usepackage{graphicx}
\usepackage[margin=2cm]{geometry}

\begin{document}

\begin{center}
    {\Large \textbf{ĐỀ KIỂM TRA}}\\[4pt]
    Môn: \dotfill \quad Lớp: \dotfill\\[2pt]
    Thời gian làm bài: 45 phút
\end{center}

\noindent Họ và tên: \dotfill \quad Số báo danh: \dotfill

\section*{Phần I. Trắc nghiệm}
% Mỗi câu trắc nghiệm có 4 phương án A, B, C, D; chỉ một phương án đúng.

\section*{Phần II. Tự luận}
% Trình bày lời giải chi tiết.

\vfill
\begin{center}\textit{--- Hết ---}\end{center}

\end{document}"#;

pub const EXAM_TEMPLATE_EN: &str = r#"\documentclass[12pt,a4paper]{article}
\usepackage[utf8]{inputenc}
\usepackage{amsmath,amssymb}
\usepackage{enumitem}
\usepackage{tikz}
\usepackage{graphicx}
\usepackage[margin=2cm]{geometry}

\begin{document}

\begin{center}
    {\Large \textbf{EXAMINATION PAPER}}\\[4pt]
    Subject: \dotfill \quad Grade: \dotfill\\[2pt]
    Time allowed: 45 minutes
\end{center}

\noindent Full name: \dotfill \quad Student ID: \dotfill

\section*{Part I. Multiple choice}
% Each question has four options A, B, C, D; exactly one is correct.

\section*{Part II. Essay questions}
% Present full worked solutions.

\vfill
\begin{center}\textit{--- End of paper ---}\end{center}

\end{document}"#;
