// End-to-end pipeline tests
//
// Result files on disk -> aggregate table -> chart plan -> rendered images.

use fftcmp_chart::{ChartStyle, Renderer};
use fftcmp_core::{Error, ImageFormat, PlanOptions, SuiteConfig, ThreadingMode};
use fftcmp_integration_tests::{init_tracing, Fixture, TestResult};

/// Two single-threaded implementations on one architecture make one chart
#[test]
fn rome_pair_makes_one_chart_with_two_lines() -> TestResult<()> {
    init_tracing();
    let fx = Fixture::with(SuiteConfig::full(), &["rome"], &["mkl", "fftw3"])?;
    fx.write_report("mkl", "rome", &[("run_fft<1024,1>", 10.0), ("run_fft<2048,1>", 20.0)])?;
    fx.write_report("fftw3", "rome", &[("run_fft<1024,1>", 10.0), ("run_fft<2048,1>", 20.0)])?;

    let charts = fx.plan(PlanOptions::default())?;
    assert_eq!(charts.len(), 1);
    let chart = &charts[0];
    assert_eq!(chart.file_name, "1d_c2c_st_rome.png");
    assert_eq!(chart.mode, ThreadingMode::SingleThreaded);
    assert_eq!(chart.title, "1D C2C on AMD EPYC 7742 (single-threaded)");
    let names: Vec<_> = chart.series.iter().map(|s| s.implementation.as_str()).collect();
    assert_eq!(names, ["mkl", "fftw3"]);
    for series in &chart.series {
        assert_eq!(series.points, [(1024, 10.0), (2048, 20.0)]);
    }
    Ok(())
}

/// Every dimension, architecture and mode gets a chart when all files carry all dimensions
#[test]
fn full_suite_covers_every_combination() -> TestResult<()> {
    init_tracing();
    let fx = Fixture::new(SuiteConfig::full())?;
    fx.write_all(&[("run<65536,1>", 40.0), ("run<256,2>", 90.0), ("run<1024,1>", 0.5), ("run<32,3>", 60.0)])?;

    let table = fx.aggregate()?;
    assert_eq!(table.len(), 30);
    assert_eq!(table.measurement_count(), 120);
    assert_eq!(table.architectures().collect::<Vec<_>>(), ["rome", "skylake", "icelake"]);

    let charts = fx.plan(PlanOptions::default())?;
    assert_eq!(charts.len(), 3 * 3 * 2);
    for chart in &charts {
        let expected = match chart.mode {
            ThreadingMode::SingleThreaded => 6,
            ThreadingMode::MultiThreaded => 4,
        };
        assert_eq!(chart.series.len(), expected, "{}", chart.file_name);
        for series in &chart.series {
            let sizes: Vec<_> = series.points.iter().map(|p| p.0).collect();
            let mut sorted = sizes.clone();
            sorted.sort();
            assert_eq!(sizes, sorted);
        }
    }
    assert_eq!(charts[0].file_name, "1d_c2c_st_rome.png");
    assert_eq!(charts[0].series[0].points, [(1024, 0.5), (65536, 40.0)]);
    assert_eq!(charts[1].file_name, "1d_c2c_mt_rome.png");
    assert!(charts.iter().any(|c| c.file_name == "3d_c2c_mt_icelake.png"));
    Ok(())
}

/// A single missing report aborts before anything is planned or drawn
#[test]
fn missing_report_aborts_the_run() -> TestResult<()> {
    init_tracing();
    let fx = Fixture::new(SuiteConfig::full())?;
    fx.write_all(&[("run<64,1>", 1.0)])?;
    fx.remove("kiss", "icelake")?;

    match fx.aggregate() {
        Err(Error::MissingFile { path }) => assert!(path.ends_with("kiss-icelake.json")),
        other => panic!("expected missing file, got {other:?}"),
    }
    assert!(fx.plan(PlanOptions::default()).is_err());
    assert!(fx.written_charts()?.is_empty());
    Ok(())
}

/// Size-only names, including the shift form, plot as 1-D
#[test]
fn basic_suite_reads_size_only_names() -> TestResult<()> {
    init_tracing();
    let fx = Fixture::new(SuiteConfig::basic())?;
    fx.write_all(&[("run_1d_fft<1 << 12>", 8.0), ("run_1d_fft<256>", 0.4), ("run_1d_fft<(1 << 10)>", 2.0)])?;

    let options = PlanOptions { sort_by_size: false, format: ImageFormat::Svg };
    let charts = fx.plan(options)?;
    assert_eq!(charts.len(), 3 * 2);
    let st = &charts[0];
    assert_eq!(st.file_name, "1d_c2c_st_rome.svg");
    assert_eq!(st.series.len(), 4);
    assert_eq!(st.series[0].points, [(4096, 8.0), (256, 0.4), (1024, 2.0)]);
    assert_eq!(charts[1].series.iter().map(|s| s.implementation.as_str()).collect::<Vec<_>>(), ["mkl-omp", "fftw3-omp"]);
    Ok(())
}

/// Implementations without data for a dimension are left out of that chart
#[test]
fn sparse_dimensions_skip_empty_lines_and_charts() -> TestResult<()> {
    init_tracing();
    let fx = Fixture::with(SuiteConfig::full(), &["skylake"], &["mkl", "pocket", "mkl-omp"])?;
    fx.write_report("mkl", "skylake", &[("run<64,1>", 1.0), ("run<8,2>", 2.0)])?;
    fx.write_report("pocket", "skylake", &[("run<64,1>", 1.5)])?;
    fx.write_report("mkl-omp", "skylake", &[])?;

    let charts = fx.plan(PlanOptions::default())?;
    let names: Vec<_> = charts.iter().map(|c| c.file_name.as_str()).collect();
    assert_eq!(names, ["1d_c2c_st_skylake.png", "2d_c2c_st_skylake.png"]);
    assert_eq!(charts[0].series.len(), 2);
    assert_eq!(charts[1].series.len(), 1);
    assert_eq!(charts[1].cpu_name, "Intel Xeon Gold 6148");
    Ok(())
}

// Text layout goes through the system font database.
fn fonts_or_skip() -> bool {
    let ok = ChartStyle::default().font_available();
    if !ok {
        eprintln!("skipping: no sans-serif font installed");
    }
    ok
}

#[test]
fn renders_every_planned_chart() -> TestResult<()> {
    if !fonts_or_skip() {
        return Ok(());
    }
    init_tracing();
    let fx = Fixture::with(SuiteConfig::full(), &["rome"], &["mkl", "fftw3-omp"])?;
    fx.write_all(&[("run<256,1>", 1.0), ("run<4096,1>", 30.0)])?;

    let charts = fx.plan(PlanOptions::default())?;
    let written = Renderer::new(fx.output_dir()).render_all(&charts)?;
    assert_eq!(written.len(), 2);
    assert_eq!(fx.written_charts()?, ["1d_c2c_mt_rome.png", "1d_c2c_st_rome.png"]);
    Ok(())
}

/// The two-implementation rome run draws one single-threaded image with both lines
#[test]
fn rome_pair_draws_one_image_with_two_lines() -> TestResult<()> {
    if !fonts_or_skip() {
        return Ok(());
    }
    init_tracing();
    let fx = Fixture::with(SuiteConfig::full(), &["rome"], &["mkl", "fftw3"])?;
    fx.write_all(&[("<1024,1>", 10.0), ("<2048,1>", 20.0)])?;

    let charts = fx.plan(PlanOptions { format: ImageFormat::Svg, ..PlanOptions::default() })?;
    Renderer::new(fx.output_dir()).render_all(&charts)?;
    assert_eq!(fx.written_charts()?, ["1d_c2c_st_rome.svg"]);
    let svg = std::fs::read_to_string(fx.output_dir().join("1d_c2c_st_rome.svg"))?;
    assert!(svg.contains("mkl"));
    assert!(svg.contains("fftw3"));
    Ok(())
}

/// A threading mode whose times are all zero is left out; the other charts are still drawn
#[test]
fn zero_time_reports_skip_their_chart() -> TestResult<()> {
    if !fonts_or_skip() {
        return Ok(());
    }
    init_tracing();
    let fx = Fixture::with(SuiteConfig::full(), &["rome"], &["mkl", "mkl-omp"])?;
    fx.write_report("mkl", "rome", &[("<1024,1>", 10.0), ("<2048,1>", 20.0)])?;
    fx.write_report("mkl-omp", "rome", &[("<1024,1>", 0.0), ("<2048,1>", 0.0)])?;

    let charts = fx.plan(PlanOptions::default())?;
    assert_eq!(charts.len(), 2);
    let written = Renderer::new(fx.output_dir()).render_all(&charts)?;
    assert_eq!(written.len(), 1);
    assert_eq!(fx.written_charts()?, ["1d_c2c_st_rome.png"]);
    Ok(())
}
